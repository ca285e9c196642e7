//! Transaction wire-format serialization/deserialization
//!
//! Two layouts share the same field encodings:
//!
//! Legacy:
//! - Version (4 bytes, little-endian, signed)
//! - Input count (varint)
//! - For each input:
//!   - Previous transaction id (32 bytes, wire order)
//!   - Previous output index (4 bytes, little-endian)
//!   - Script length (varint) + script bytes
//!   - Sequence (4 bytes, little-endian)
//! - Output count (varint)
//! - For each output:
//!   - Value (8 bytes, little-endian, signed)
//!   - Script length (varint) + script bytes
//! - Lock time (4 bytes, little-endian)
//!
//! Witness: identical, plus the 0x00 0x01 marker/flag pair after the
//! version and one witness stack per input between the outputs and the
//! lock time. A transaction with no witness data has no witness layout of
//! its own: `serialize_witness` degrades to the legacy bytes, so the
//! canonical identifier is always well-defined.
//!
//! Input `txid`s cross this boundary in display order and are
//! byte-reversed to wire order on encode, and back on decode.

use super::varint::{decode_varint, encode_varint};
use crate::constants::{SEGWIT_FLAG, SEGWIT_MARKER, TXID_SIZE};
use crate::crypto::{hash256, reverse_bytes};
use crate::error::{CodecError, Result};
use crate::types::*;

fn serialize_input(result: &mut Vec<u8>, input: &TxInput) {
    // Previous transaction id (32 bytes, display order reversed to wire order)
    result.extend_from_slice(&reverse_bytes(&input.txid));

    // Previous output index (4 bytes, little-endian)
    result.extend_from_slice(&input.vout.to_le_bytes());

    // Script length (varint) + script bytes
    result.extend_from_slice(&encode_varint(input.script_sig.len() as u64));
    result.extend_from_slice(&input.script_sig);

    // Sequence (4 bytes, little-endian)
    result.extend_from_slice(&input.sequence.to_le_bytes());
}

fn serialize_output(result: &mut Vec<u8>, output: &TxOutput) {
    // Value (8 bytes, little-endian, signed)
    result.extend_from_slice(&output.value.to_le_bytes());

    // Script length (varint) + script bytes
    result.extend_from_slice(&encode_varint(output.script_pubkey.len() as u64));
    result.extend_from_slice(&output.script_pubkey);
}

/// Serialize a transaction in the legacy (pre-witness) layout
///
/// Witness stacks and attached prevouts are ignored. The double SHA-256
/// of these bytes, reversed, is the transaction's canonical identifier
/// when the transaction is not witness-bearing.
pub fn serialize_legacy(tx: &Transaction) -> Vec<u8> {
    let mut result = Vec::new();

    // Version (4 bytes, little-endian, signed)
    result.extend_from_slice(&tx.version.to_le_bytes());

    // Input count (varint), then inputs
    result.extend_from_slice(&encode_varint(tx.inputs.len() as u64));
    for input in &tx.inputs {
        serialize_input(&mut result, input);
    }

    // Output count (varint), then outputs
    result.extend_from_slice(&encode_varint(tx.outputs.len() as u64));
    for output in &tx.outputs {
        serialize_output(&mut result, output);
    }

    // Lock time (4 bytes, little-endian)
    result.extend_from_slice(&tx.lock_time.to_le_bytes());

    result
}

/// Serialize a transaction in the witness layout
///
/// Inserts the marker/flag pair after the version and appends one witness
/// stack per input after the outputs. An input with no witness data
/// contributes a single zero-count varint.
///
/// When no input carries witness data this degrades to exactly
/// [`serialize_legacy`]: callers select the layout by the witness-bearing
/// check, never by which function they happened to call.
pub fn serialize_witness(tx: &Transaction) -> Vec<u8> {
    if !tx.has_witness() {
        return serialize_legacy(tx);
    }

    let mut result = Vec::new();

    // Version (4 bytes, little-endian, signed)
    result.extend_from_slice(&tx.version.to_le_bytes());

    // Marker + flag
    result.push(SEGWIT_MARKER);
    result.push(SEGWIT_FLAG);

    // Input count (varint), then inputs
    result.extend_from_slice(&encode_varint(tx.inputs.len() as u64));
    for input in &tx.inputs {
        serialize_input(&mut result, input);
    }

    // Output count (varint), then outputs
    result.extend_from_slice(&encode_varint(tx.outputs.len() as u64));
    for output in &tx.outputs {
        serialize_output(&mut result, output);
    }

    // Witness stacks, one per input in input order
    for input in &tx.inputs {
        result.extend_from_slice(&encode_varint(input.witness.len() as u64));
        for item in &input.witness {
            result.extend_from_slice(&encode_varint(item.len() as u64));
            result.extend_from_slice(item);
        }
    }

    // Lock time (4 bytes, little-endian)
    result.extend_from_slice(&tx.lock_time.to_le_bytes());

    result
}

/// Byte length of the legacy serialization
///
/// Deliberately the non-witness length, not the BIP141 discounted weight:
/// witness-aware weight/virtual-size accounting belongs to the block
/// assembler consuming these bytes.
pub fn weight(tx: &Transaction) -> usize {
    serialize_legacy(tx).len()
}

/// Canonical transaction identifier: reversed double SHA-256 of the
/// legacy serialization, lowercase hex
pub fn txid(tx: &Transaction) -> String {
    hex::encode(reverse_bytes(&hash256(&serialize_legacy(tx))))
}

/// Witness transaction identifier: reversed double SHA-256 of the witness
/// serialization, lowercase hex
///
/// Equal to [`txid`] for a transaction with no witness data.
pub fn wtxid(tx: &Transaction) -> String {
    hex::encode(reverse_bytes(&hash256(&serialize_witness(tx))))
}

fn take<'a>(data: &'a [u8], offset: &mut usize, len: usize) -> Result<&'a [u8]> {
    let available = data.len() - *offset;
    if available < len {
        return Err(CodecError::TruncatedInput {
            needed: len - available,
            available,
        });
    }
    let slice = &data[*offset..*offset + len];
    *offset += len;
    Ok(slice)
}

fn read_varint(data: &[u8], offset: &mut usize) -> Result<u64> {
    let (value, consumed) = decode_varint(&data[*offset..])?;
    *offset += consumed;
    Ok(value)
}

fn length_to_usize(value: u64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| CodecError::InvalidLength("length field exceeds address space".into()))
}

fn read_u32_le(data: &[u8], offset: &mut usize) -> Result<u32> {
    let bytes = take(data, offset, 4)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn parse_witness(data: &[u8], offset: &mut usize) -> Result<Witness> {
    let item_count = length_to_usize(read_varint(data, offset)?)?;
    let mut witness = Witness::new();
    for _ in 0..item_count {
        let item_len = length_to_usize(read_varint(data, offset)?)?;
        witness.push(take(data, offset, item_len)?.to_vec());
    }
    Ok(witness)
}

/// Deserialize a transaction from either wire layout
///
/// Detects the witness framing by the marker byte after the version; a
/// marker must be followed by the 0x01 flag. Input `txid`s are restored
/// to display order and witness stacks are attached to their inputs.
/// The whole buffer must be consumed.
///
/// Round trip with the matching serializer is byte-exact, so decoded
/// transactions re-serialize to their original identifier.
pub fn deserialize_transaction(data: &[u8]) -> Result<Transaction> {
    let mut offset = 0;

    // Version (4 bytes, little-endian, signed)
    let bytes = take(data, &mut offset, 4)?;
    let version = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

    // Witness framing: marker byte, then mandatory flag
    let mut segwit = false;
    if data.get(offset) == Some(&SEGWIT_MARKER) {
        let pair = take(data, &mut offset, 2)?;
        if pair[1] != SEGWIT_FLAG {
            return Err(CodecError::InvalidWitnessFlag(pair[1]));
        }
        segwit = true;
    }

    // Input count (varint), then inputs
    let input_count = length_to_usize(read_varint(data, &mut offset)?)?;
    let mut inputs = Vec::with_capacity(input_count.min(1024));
    for _ in 0..input_count {
        let mut txid = [0u8; TXID_SIZE];
        txid.copy_from_slice(&reverse_bytes(take(data, &mut offset, TXID_SIZE)?));

        let vout = read_u32_le(data, &mut offset)?;

        let script_len = length_to_usize(read_varint(data, &mut offset)?)?;
        let script_sig = take(data, &mut offset, script_len)?.to_vec();

        let sequence = read_u32_le(data, &mut offset)?;

        inputs.push(TxInput {
            txid,
            vout,
            script_sig,
            sequence,
            witness: Witness::new(),
            prevout: None,
        });
    }

    // Output count (varint), then outputs
    let output_count = length_to_usize(read_varint(data, &mut offset)?)?;
    let mut outputs = Vec::with_capacity(output_count.min(1024));
    for _ in 0..output_count {
        let bytes = take(data, &mut offset, 8)?;
        let value = i64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]);

        let script_len = length_to_usize(read_varint(data, &mut offset)?)?;
        let script_pubkey = take(data, &mut offset, script_len)?.to_vec();

        outputs.push(TxOutput {
            value,
            script_pubkey,
        });
    }

    // Witness stacks, one per input
    if segwit {
        for input in &mut inputs {
            input.witness = parse_witness(data, &mut offset)?;
        }
    }

    // Lock time (4 bytes, little-endian)
    let lock_time = read_u32_le(data, &mut offset)?;

    if offset != data.len() {
        return Err(CodecError::TrailingBytes(data.len() - offset));
    }

    Ok(Transaction {
        version,
        inputs,
        outputs,
        lock_time,
    })
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_output() -> impl Strategy<Value = TxOutput> {
        (any::<i64>(), prop::collection::vec(any::<u8>(), 0..40)).prop_map(
            |(value, script_pubkey)| TxOutput {
                value,
                script_pubkey,
            },
        )
    }

    fn arb_input() -> impl Strategy<Value = TxInput> {
        (
            prop::array::uniform32(any::<u8>()),
            any::<u32>(),
            prop::collection::vec(any::<u8>(), 0..40),
            any::<u32>(),
            prop::collection::vec(prop::collection::vec(any::<u8>(), 0..40), 0..3),
        )
            .prop_map(|(txid, vout, script_sig, sequence, witness)| TxInput {
                txid,
                vout,
                script_sig,
                sequence,
                witness,
                prevout: None,
            })
    }

    // At least one input: a zero-input legacy transaction opens with a
    // 0x00 count byte, which the wire format cannot distinguish from the
    // witness marker.
    fn arb_transaction() -> impl Strategy<Value = Transaction> {
        (
            any::<i32>(),
            prop::collection::vec(arb_input(), 1..4),
            prop::collection::vec(arb_output(), 0..4),
            any::<u32>(),
        )
            .prop_map(|(version, inputs, outputs, lock_time)| Transaction {
                version,
                inputs,
                outputs,
                lock_time,
            })
    }

    proptest! {
        #[test]
        fn prop_round_trip_is_byte_exact(tx in arb_transaction()) {
            let encoded = serialize_witness(&tx);
            let decoded = deserialize_transaction(&encoded).unwrap();
            prop_assert_eq!(&decoded, &tx);
            prop_assert_eq!(serialize_witness(&decoded), encoded);
        }

        #[test]
        fn prop_legacy_ignores_witness_data(tx in arb_transaction()) {
            let mut stripped = tx.clone();
            for input in &mut stripped.inputs {
                input.witness.clear();
            }
            prop_assert_eq!(serialize_legacy(&stripped), serialize_legacy(&tx));
        }

        #[test]
        fn prop_serialization_is_deterministic(tx in arb_transaction()) {
            prop_assert_eq!(serialize_legacy(&tx), serialize_legacy(&tx));
            prop_assert_eq!(serialize_witness(&tx), serialize_witness(&tx));
        }
    }
}
