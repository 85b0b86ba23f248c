//! Day-offset date handling.
//!
//! Dates cross the device/authority boundary as an integer number of days
//! since the protocol epoch (2021-01-01) and are converted to calendar dates
//! only at the authority. The store persists them as TEXT `YYYY-MM-DD`.

use chrono::{Days, NaiveDate};

/// Protocol epoch: day offset 0.
pub const EPOCH_YMD: (i32, u32, u32) = (2021, 1, 1);

/// Convert a day offset to its calendar date.
///
/// Returns `None` if the offset lands outside the representable calendar
/// range.
pub fn date_from_offset(offset: u32) -> Option<NaiveDate> {
    let (y, m, d) = EPOCH_YMD;
    NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(u64::from(offset)))
}

/// Format a calendar date the way the store persists it.
pub fn store_format(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
