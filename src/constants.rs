//! Wire-format constants shared across the codec

/// SegWit serialization marker byte, placed immediately after the version field
pub const SEGWIT_MARKER: u8 = 0x00;

/// SegWit serialization flag byte, follows the marker
pub const SEGWIT_FLAG: u8 = 0x01;

/// DER SEQUENCE tag opening an ECDSA signature envelope
pub const DER_SEQUENCE_TAG: u8 = 0x30;

/// DER INTEGER tag opening each of the R and S values
pub const DER_INTEGER_TAG: u8 = 0x02;

/// Width of a curve scalar (R or S) in the fixed-width compact form
pub const SCALAR_SIZE: usize = 32;

/// Width of the compact signature (R ∥ S)
pub const COMPACT_SIGNATURE_SIZE: usize = 2 * SCALAR_SIZE;

/// Width of a transaction identifier
pub const TXID_SIZE: usize = 32;
