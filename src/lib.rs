//! # txcodec
//!
//! Wire-format codec for a single cryptocurrency-style transaction
//! record: the canonical legacy and segregated-witness byte
//! serializations, the signable pre-image for a given input, and
//! extraction of the (R, S) pair from a DER-encoded ECDSA signature.
//!
//! Exact byte layout is the whole point: integer widths, little-endian
//! order, CompactSize prefixes, identifier byte reversal and the
//! length-prefixed witness framing must all match the external protocol,
//! or the transaction hashes to the wrong identifier and fails
//! validation.
//!
//! ## Design principles
//!
//! 1. **Pure functions**: every operation is a deterministic,
//!    side-effect-free function of its arguments; concurrent use needs no
//!    locking.
//! 2. **Bytes inside, hex at the boundary**: the codec works on byte
//!    buffers; identifiers leave as lowercase hex strings.
//! 3. **Callers own their transactions**: pre-image construction builds a
//!    modified copy and never mutates its input.
//!
//! Script interpretation, address derivation, block assembly and curve
//! arithmetic are external collaborators that consume this crate's
//! output.
//!
//! ## Usage
//!
//! ```rust
//! use txcodec::types::{Transaction, TxInput, TxOutput, Witness};
//! use txcodec::serialization::{deserialize_transaction, serialize_legacy};
//!
//! let tx = Transaction {
//!     version: 2,
//!     inputs: vec![TxInput {
//!         txid: [0xab; 32],
//!         vout: 0,
//!         script_sig: vec![],
//!         sequence: 0xffffffff,
//!         witness: Witness::new(),
//!         prevout: None,
//!     }],
//!     outputs: vec![TxOutput {
//!         value: 50_000,
//!         script_pubkey: vec![0x51],
//!     }],
//!     lock_time: 0,
//! };
//!
//! let encoded = serialize_legacy(&tx);
//! assert_eq!(deserialize_transaction(&encoded).unwrap(), tx);
//! ```

pub mod constants;
pub mod crypto;
pub mod error;
pub mod serialization;
pub mod signature;
pub mod transaction_hash;
pub mod types;

pub use error::{CodecError, Result};
pub use serialization::{
    deserialize_transaction, serialize_legacy, serialize_witness, txid, weight, wtxid,
};
pub use signature::{extract_rs, split_sighash, CompactSignature};
pub use transaction_hash::{signature_hash, signing_preimage, SighashType};
pub use types::{ByteString, Hash, Transaction, TxInput, TxOutput, Witness};
