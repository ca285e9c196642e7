//! Cryptographic hash functions and byte-order helpers
//!
//! Pure functions over byte slices. Transaction identifiers and signing
//! digests use double SHA-256; address-derivation collaborators use
//! RIPEMD-160 of SHA-256. Identifiers are computed in wire order but
//! referenced in reversed (display) order, hence `reverse_bytes`.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Single SHA-256
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut result = [0u8; 32];
    result.copy_from_slice(&Sha256::digest(data));
    result
}

/// Double SHA-256: SHA256(SHA256(data))
///
/// Used for transaction identifiers and signing pre-image digests.
pub fn hash256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let mut result = [0u8; 32];
    result.copy_from_slice(&Sha256::digest(first));
    result
}

/// RIPEMD160(SHA256(data))
///
/// Not consumed by the codec itself; exposed for address-derivation
/// collaborators that work from the same byte streams.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let mut result = [0u8; 20];
    result.copy_from_slice(&Ripemd160::digest(sha));
    result
}

/// Byte-wise reversal
///
/// Converts between wire order and display order for 256-bit identifiers.
pub fn reverse_bytes(data: &[u8]) -> Vec<u8> {
    data.iter().rev().copied().collect()
}
