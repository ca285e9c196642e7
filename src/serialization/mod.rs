//! Transaction wire-format serialization/deserialization
//!
//! Byte-exact encoding of the transaction record in its legacy and
//! segregated-witness layouts. All multi-byte integers are little-endian;
//! variable-length fields are prefixed with a CompactSize varint.

pub mod transaction;
pub mod varint;

pub use transaction::{
    deserialize_transaction, serialize_legacy, serialize_witness, txid, weight, wtxid,
};
pub use varint::{decode_varint, encode_varint};
