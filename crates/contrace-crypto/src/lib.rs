//! # contrace-crypto
//!
//! Hashing primitives for the Contrace protocol. The suite is fixed; no
//! algorithm negotiation is permitted.
//!
//! ## Modules
//!
//! - [`blake3`] — Domain-separated BLAKE3 hashing (registered context strings)
//! - [`identity`] — Device identity derivation from static configuration

pub mod blake3;
pub mod identity;
