//! Integration test crate for the Contrace workspace.
//!
//! No library logic lives here; the scenarios are under `tests/`.
