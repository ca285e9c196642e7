//! Core transaction types for wire-format encoding

use serde::{Deserialize, Serialize};

/// Hash type: 256-bit hash
pub type Hash = [u8; 32];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Witness stack: ordered byte strings attached to one input
pub type Witness = Vec<ByteString>;

/// Transaction input
///
/// `txid` is held in display order, the byte-reversed form of the wire
/// encoding, matching how previous-transaction identifiers are referenced
/// everywhere outside the raw byte stream. The serializer reverses it on
/// the way out and the decoder reverses it back.
///
/// `prevout` is the output this input spends. It is supplied by the caller,
/// consumed only when building a signing pre-image, and never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    pub txid: Hash,
    pub vout: u32,
    pub script_sig: ByteString,
    pub sequence: u32,
    pub witness: Witness,
    pub prevout: Option<TxOutput>,
}

/// Transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub value: i64,
    pub script_pubkey: ByteString,
}

/// Transaction
///
/// `version` is a signed 32-bit field: the wire format historically admits
/// negative versions even though real-world values are small positives.
/// Input and output order is hash-significant and preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub lock_time: u32,
}

impl Transaction {
    /// Whether any input carries witness data.
    ///
    /// This single fact selects the layout that defines the transaction's
    /// canonical identifier: witness-bearing transactions serialize with
    /// the marker/flag framing, all others with the legacy layout.
    pub fn has_witness(&self) -> bool {
        self.inputs.iter().any(|input| !input.witness.is_empty())
    }
}
