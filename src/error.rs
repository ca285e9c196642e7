//! Error types for wire-format encoding and decoding

use std::borrow::Cow;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CodecError {
    #[error("truncated input: need {needed} more bytes, have {available}")]
    TruncatedInput { needed: usize, available: usize },

    #[error("non-canonical varint encoding for value {0}")]
    NonCanonicalVarInt(u64),

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),

    #[error("malformed signature: {0}")]
    MalformedSignature(Cow<'static, str>),

    #[error("unexpected DER tag: expected {expected:#04x}, got {got:#04x}")]
    UnexpectedTag { expected: u8, got: u8 },

    #[error("invalid length: {0}")]
    InvalidLength(Cow<'static, str>),

    #[error("invalid witness flag: {0:#04x}")]
    InvalidWitnessFlag(u8),

    #[error("invalid input index: {0}")]
    InvalidInputIndex(usize),

    #[error("input {0} has no previous output attached")]
    MissingPrevout(usize),

    #[error("invalid sighash type: {0:#04x}")]
    InvalidSighashType(u8),

    #[error("sighash type {0:#04x} has no pre-image rule in this codec")]
    UnsupportedSighashType(u8),
}

pub type Result<T> = std::result::Result<T, CodecError>;
