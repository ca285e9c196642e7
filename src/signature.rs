//! DER signature parsing: (R, S) extraction to fixed-width compact form
//!
//! An ECDSA signature travels in scripts as a DER SEQUENCE of two
//! INTEGERs followed by a one-byte sighash type. Curve-verification
//! routines want the two scalars side by side at a fixed 32-byte width
//! instead, with the DER sign-padding byte stripped. Every tag and length
//! in the envelope is checked; a declared length never reads past the end
//! of the buffer.

use crate::constants::{COMPACT_SIGNATURE_SIZE, DER_INTEGER_TAG, DER_SEQUENCE_TAG, SCALAR_SIZE};
use crate::error::{CodecError, Result};

/// Fixed-width (R, S) pair extracted from a DER envelope
///
/// Each scalar is left-zero-padded to 32 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactSignature {
    pub r: [u8; SCALAR_SIZE],
    pub s: [u8; SCALAR_SIZE],
}

impl CompactSignature {
    /// R ∥ S as the 64-byte buffer curve-verification routines expect
    pub fn to_bytes(&self) -> [u8; COMPACT_SIGNATURE_SIZE] {
        let mut bytes = [0u8; COMPACT_SIGNATURE_SIZE];
        bytes[..SCALAR_SIZE].copy_from_slice(&self.r);
        bytes[SCALAR_SIZE..].copy_from_slice(&self.s);
        bytes
    }
}

fn read_byte(data: &[u8], offset: &mut usize) -> Result<u8> {
    let byte = *data.get(*offset).ok_or(CodecError::TruncatedInput {
        needed: 1,
        available: 0,
    })?;
    *offset += 1;
    Ok(byte)
}

/// Read one DER INTEGER and normalize it to a 32-byte scalar
///
/// A 33-byte value must carry the 0x00 sign pad, which is dropped;
/// shorter values are left-zero-padded.
fn read_scalar(data: &[u8], offset: &mut usize) -> Result<[u8; SCALAR_SIZE]> {
    let tag = read_byte(data, offset)?;
    if tag != DER_INTEGER_TAG {
        return Err(CodecError::UnexpectedTag {
            expected: DER_INTEGER_TAG,
            got: tag,
        });
    }

    let len = read_byte(data, offset)? as usize;
    if len > SCALAR_SIZE + 1 {
        return Err(CodecError::InvalidLength(
            "DER integer wider than a padded scalar".into(),
        ));
    }

    let available = data.len() - *offset;
    if available < len {
        return Err(CodecError::TruncatedInput {
            needed: len - available,
            available,
        });
    }
    let mut value = &data[*offset..*offset + len];
    *offset += len;

    if len == SCALAR_SIZE + 1 {
        if value[0] != 0 {
            return Err(CodecError::MalformedSignature(
                "33-byte integer without leading sign pad".into(),
            ));
        }
        value = &value[1..];
    }

    let mut scalar = [0u8; SCALAR_SIZE];
    scalar[SCALAR_SIZE - value.len()..].copy_from_slice(value);
    Ok(scalar)
}

/// Extract the (R, S) pair from a DER-encoded ECDSA signature
///
/// The input is the DER body only; strip a trailing sighash byte with
/// [`split_sighash`] first when parsing a script-embedded signature push.
///
/// # Errors
///
/// `MalformedSignature` if the stream does not open with the SEQUENCE
/// tag or a 33-byte integer lacks its sign pad, `UnexpectedTag` for a
/// missing INTEGER tag, `TruncatedInput` whenever a declared length
/// exceeds the remaining bytes, `InvalidLength` for an integer wider
/// than 33 bytes.
pub fn extract_rs(der: &[u8]) -> Result<CompactSignature> {
    let mut offset = 0;

    let tag = read_byte(der, &mut offset)?;
    if tag != DER_SEQUENCE_TAG {
        return Err(CodecError::MalformedSignature(
            "missing SEQUENCE tag".into(),
        ));
    }

    let declared = read_byte(der, &mut offset)? as usize;
    let available = der.len() - offset;
    if available < declared {
        return Err(CodecError::TruncatedInput {
            needed: declared - available,
            available,
        });
    }

    let r = read_scalar(der, &mut offset)?;
    let s = read_scalar(der, &mut offset)?;

    Ok(CompactSignature { r, s })
}

/// Split a script-embedded signature push into its DER body and trailing
/// sighash byte
pub fn split_sighash(signature: &[u8]) -> Result<(&[u8], u8)> {
    match signature.split_last() {
        Some((sighash_byte, der)) if !der.is_empty() => Ok((der, *sighash_byte)),
        _ => Err(CodecError::MalformedSignature(
            "signature too short to carry a sighash byte".into(),
        )),
    }
}
