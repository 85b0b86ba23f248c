//! Domain-separated BLAKE3 hashing for the Contrace protocol.
//!
//! Cross-domain collisions are prevented by mandatory domain separation using
//! BLAKE3's built-in mode flags: [`hash`] for pure hashing and [`derive_key`]
//! for anything that feeds an identifier or key. Unregistered context strings
//! are a protocol violation.

/// Registered BLAKE3 context strings.
pub mod contexts {
    /// Durable device identity derived from static device configuration.
    pub const DEVICE_IDENTITY: &str = "Contrace v1 device-identity";

    /// All registered context strings. Used for validation.
    pub const ALL_CONTEXTS: &[&str] = &[DEVICE_IDENTITY];
}

/// Compute the BLAKE3 hash of the input data.
pub fn hash(data: &[u8]) -> [u8; 32] {
    *::blake3::hash(data).as_bytes()
}

/// Derive a 32-byte value using BLAKE3's key derivation mode.
///
/// The context string must be one of the registered context strings in
/// [`contexts`].
pub fn derive_key(context: &str, key_material: &[u8]) -> [u8; 32] {
    let mut hasher = ::blake3::Hasher::new_derive_key(context);
    hasher.update(key_material);
    *hasher.finalize().as_bytes()
}

/// Verify that a context string is registered in the Contrace protocol.
pub fn is_registered_context(context: &str) -> bool {
    contexts::ALL_CONTEXTS.contains(&context)
}

/// Encode multiple dynamic fields using length-prefixed encoding.
///
/// Inputs become `LE32(len(field1)) || field1 || LE32(len(field2)) || ...`
/// so adjacent fields cannot be reassociated.
pub fn encode_multi_field(fields: &[&[u8]]) -> Vec<u8> {
    let total_len: usize = fields.iter().map(|f| 4 + f.len()).sum();
    let mut output = Vec::with_capacity(total_len);
    for field in fields {
        output.extend_from_slice(&(field.len() as u32).to_le_bytes());
        output.extend_from_slice(field);
    }
    output
}
