//! Signing pre-image construction for signature verification
//!
//! The pre-image is the exact byte sequence whose double SHA-256 an
//! external curve-verification routine checks against the signer's public
//! key. It is the legacy serialization of a modified copy of the
//! transaction: the signed input carries the script of the output it
//! spends, every other input an empty script, and a 4-byte little-endian
//! sighash field closes the stream.
//!
//! Only the "sign everything" rule is implemented; the remaining sighash
//! variants exist as vocabulary and fail explicitly.

use crate::crypto::hash256;
use crate::error::{CodecError, Result};
use crate::serialization::serialize_legacy;
use crate::types::*;

/// Sighash types appearing in script-embedded signatures
///
/// Discriminants are the trailing byte of a signature push. Only
/// [`SighashType::All`] has a pre-image rule in this codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SighashType {
    /// Sign all inputs and all outputs (default)
    All = 0x01,
    /// Sign all inputs, no outputs
    None = 0x02,
    /// Sign all inputs and the output at the same index
    Single = 0x03,
    /// Sign only this input, all outputs
    AllAnyoneCanPay = 0x81,
    /// Sign only this input, no outputs
    NoneAnyoneCanPay = 0x82,
    /// Sign only this input and the output at the same index
    SingleAnyoneCanPay = 0x83,
}

impl SighashType {
    /// Parse a sighash type from the trailing signature byte
    pub fn from_byte(byte: u8) -> Result<Self> {
        match byte {
            0x01 => Ok(SighashType::All),
            0x02 => Ok(SighashType::None),
            0x03 => Ok(SighashType::Single),
            0x81 => Ok(SighashType::AllAnyoneCanPay),
            0x82 => Ok(SighashType::NoneAnyoneCanPay),
            0x83 => Ok(SighashType::SingleAnyoneCanPay),
            _ => Err(CodecError::InvalidSighashType(byte)),
        }
    }
}

/// Build the signing pre-image for one input
///
/// Produces a fresh input sequence; the caller's transaction is never
/// aliased or mutated. The input at `input_index` takes the
/// `script_pubkey` of its attached `prevout` as its script; every other
/// input's script is emptied. Witness stacks and prevouts do not
/// participate. The serialized copy is closed with the sighash type as a
/// 4-byte little-endian field.
///
/// # Errors
///
/// `InvalidInputIndex` if `input_index` is out of range,
/// `MissingPrevout` if the signed input has no previous output attached,
/// `UnsupportedSighashType` for any type other than [`SighashType::All`].
pub fn signing_preimage(
    tx: &Transaction,
    input_index: usize,
    sighash_type: SighashType,
) -> Result<Vec<u8>> {
    if input_index >= tx.inputs.len() {
        return Err(CodecError::InvalidInputIndex(input_index));
    }
    if sighash_type != SighashType::All {
        return Err(CodecError::UnsupportedSighashType(sighash_type as u8));
    }

    let mut inputs = Vec::with_capacity(tx.inputs.len());
    for (i, input) in tx.inputs.iter().enumerate() {
        let script_sig = if i == input_index {
            input
                .prevout
                .as_ref()
                .ok_or(CodecError::MissingPrevout(i))?
                .script_pubkey
                .clone()
        } else {
            ByteString::new()
        };
        inputs.push(TxInput {
            script_sig,
            witness: Witness::new(),
            prevout: None,
            ..input.clone()
        });
    }

    let stripped = Transaction {
        version: tx.version,
        inputs,
        outputs: tx.outputs.clone(),
        lock_time: tx.lock_time,
    };

    let mut preimage = serialize_legacy(&stripped);
    preimage.extend_from_slice(&(sighash_type as u32).to_le_bytes());
    Ok(preimage)
}

/// Double SHA-256 of the signing pre-image
///
/// This digest is the message an external verifier checks the (R, S)
/// pair against.
pub fn signature_hash(
    tx: &Transaction,
    input_index: usize,
    sighash_type: SighashType,
) -> Result<Hash> {
    Ok(hash256(&signing_preimage(tx, input_index, sighash_type)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spend(script_pubkey: ByteString) -> TxInput {
        TxInput {
            txid: [0x11; 32],
            vout: 0,
            script_sig: vec![0xde, 0xad],
            sequence: 0xffffffff,
            witness: Witness::new(),
            prevout: Some(TxOutput {
                value: 1000,
                script_pubkey,
            }),
        }
    }

    fn two_input_tx() -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![spend(vec![0xaa, 0xbb]), spend(vec![0xcc])],
            outputs: vec![TxOutput {
                value: 900,
                script_pubkey: vec![0x51],
            }],
            lock_time: 0,
        }
    }

    #[test]
    fn test_sighash_type_from_byte() {
        assert_eq!(SighashType::from_byte(0x01).unwrap(), SighashType::All);
        assert_eq!(SighashType::from_byte(0x03).unwrap(), SighashType::Single);
        assert_eq!(
            SighashType::from_byte(0x81).unwrap(),
            SighashType::AllAnyoneCanPay
        );
        assert_eq!(
            SighashType::from_byte(0x00),
            Err(CodecError::InvalidSighashType(0x00))
        );
        assert_eq!(
            SighashType::from_byte(0x04),
            Err(CodecError::InvalidSighashType(0x04))
        );
    }

    #[test]
    fn test_preimage_substitutes_scripts() {
        let tx = two_input_tx();
        let preimage = signing_preimage(&tx, 0, SighashType::All).unwrap();

        // input 0 carries its prevout script, input 1 an empty script
        let mut expected = tx.clone();
        expected.inputs[0].script_sig = vec![0xaa, 0xbb];
        expected.inputs[1].script_sig = ByteString::new();
        let mut expected_bytes = serialize_legacy(&expected);
        expected_bytes.extend_from_slice(&[0x01, 0x00, 0x00, 0x00]);

        assert_eq!(preimage, expected_bytes);
    }

    #[test]
    fn test_preimage_leaves_caller_untouched() {
        let tx = two_input_tx();
        let before = tx.clone();
        signing_preimage(&tx, 1, SighashType::All).unwrap();
        assert_eq!(tx, before);
    }

    #[test]
    fn test_preimage_sighash_suffix() {
        let tx = two_input_tx();
        let preimage = signing_preimage(&tx, 0, SighashType::All).unwrap();
        assert_eq!(&preimage[preimage.len() - 4..], &[0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_preimage_invalid_index() {
        let tx = two_input_tx();
        assert_eq!(
            signing_preimage(&tx, 2, SighashType::All),
            Err(CodecError::InvalidInputIndex(2))
        );
    }

    #[test]
    fn test_preimage_missing_prevout() {
        let mut tx = two_input_tx();
        tx.inputs[1].prevout = None;
        // the untouched input needs no prevout
        assert!(signing_preimage(&tx, 0, SighashType::All).is_ok());
        // the signed one does
        assert_eq!(
            signing_preimage(&tx, 1, SighashType::All),
            Err(CodecError::MissingPrevout(1))
        );
    }

    #[test]
    fn test_preimage_unsupported_types() {
        let tx = two_input_tx();
        for ty in [
            SighashType::None,
            SighashType::Single,
            SighashType::AllAnyoneCanPay,
            SighashType::NoneAnyoneCanPay,
            SighashType::SingleAnyoneCanPay,
        ] {
            assert_eq!(
                signing_preimage(&tx, 0, ty),
                Err(CodecError::UnsupportedSighashType(ty as u8))
            );
        }
    }

    #[test]
    fn test_signature_hash_deterministic() {
        let tx = two_input_tx();
        let first = signature_hash(&tx, 0, SighashType::All).unwrap();
        let second = signature_hash(&tx, 0, SighashType::All).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, signature_hash(&tx, 1, SighashType::All).unwrap());
    }
}
