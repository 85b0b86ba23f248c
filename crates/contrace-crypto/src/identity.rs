//! Device identity derivation.
//!
//! A device's durable identity is a pure function of its static configuration
//! (network address and device name). Two devices built from identical
//! configuration collide on purpose: they model one physical device
//! re-instantiated.

use crate::blake3::{self, contexts};

/// Derive the 32-byte device identity from its configuration values.
///
/// Fields are length-prefixed before hashing, so `("ab", "c")` and
/// `("a", "bc")` produce distinct identities.
pub fn device_identity(address: &str, device_name: &str) -> [u8; 32] {
    let material = blake3::encode_multi_field(&[address.as_bytes(), device_name.as_bytes()]);
    blake3::derive_key(contexts::DEVICE_IDENTITY, &material)
}

/// The lowercase hex form of the device identity, as used on every external
/// surface (payloads, database rows, ledger file names).
pub fn device_identity_hex(address: &str, device_name: &str) -> String {
    hex::encode(device_identity(address, device_name))
}
