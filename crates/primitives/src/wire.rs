//! Variant-tagged binary wire encoding for public keys and signatures.
//!
//! Layout: a 4-byte little-endian offset-to-variant field (always 4), a
//! 1-byte variant tag (the numeric [`KeyType`]), a 4-byte little-endian
//! payload length, then the raw payload. The chain-side deserializer expects
//! this layout bit-for-bit, redundant header fields included; any deviation
//! is an interoperability defect.

use crate::{
    keys::{CompactSignature, PublicKey},
    types::KeyType,
};

/// Offset from the start of the buffer to the variant tag.
const VARIANT_OFFSET: u32 = 4;

/// Width of the header preceding the payload.
pub const WIRE_HEADER_SIZE: usize = 9;

fn encode(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(WIRE_HEADER_SIZE + payload.len());
    out.extend_from_slice(&VARIANT_OFFSET.to_le_bytes());
    out.push(tag);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// Encodes a compressed public key for the chain-side verifier (42 bytes).
pub fn encode_public_key(key: &PublicKey) -> Vec<u8> {
    encode(key.key_type().wire_tag(), &key.compressed())
}

/// Encodes a compact `r ‖ s` signature for the chain-side verifier
/// (73 bytes).
pub fn encode_signature(signature: &CompactSignature) -> Vec<u8> {
    encode(signature.key_type().wire_tag(), signature.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Keypair;

    #[test]
    fn k1_signature_layout_is_exact() {
        let rs = {
            let mut rs = [0u8; 64];
            for (i, byte) in rs.iter_mut().enumerate() {
                *byte = i as u8;
            }
            rs
        };
        let encoded = encode_signature(&CompactSignature::new(KeyType::K1, rs));

        assert_eq!(encoded.len(), 73);
        assert_eq!(&encoded[..WIRE_HEADER_SIZE], hex::decode("040000000040000000").unwrap().as_slice());
        assert_eq!(&encoded[WIRE_HEADER_SIZE..], &rs[..]);
    }

    #[test]
    fn r1_signature_carries_its_variant_tag() {
        let encoded = encode_signature(&CompactSignature::new(KeyType::R1, [0xaa; 64]));
        assert_eq!(&encoded[..WIRE_HEADER_SIZE], hex::decode("040000000140000000").unwrap().as_slice());
    }

    #[test]
    fn public_key_layout_is_exact() {
        for (key_type, tag) in [(KeyType::K1, 0x00), (KeyType::R1, 0x01)] {
            let public_key = Keypair::generate(key_type).public_key();
            let encoded = encode_public_key(&public_key);

            assert_eq!(encoded.len(), 42);
            assert_eq!(encoded[..4], [0x04, 0x00, 0x00, 0x00]);
            assert_eq!(encoded[4], tag);
            assert_eq!(encoded[5..WIRE_HEADER_SIZE], [0x21, 0x00, 0x00, 0x00]);
            assert_eq!(&encoded[WIRE_HEADER_SIZE..], public_key.compressed());
        }
    }
}
