//! Elliptic-curve key material for the K1 and R1 curves.
//!
//! The K1 context is the process-wide lazily-initialized
//! [`SECP256K1`] global; R1 operations in the RustCrypto model are
//! context-free. Both curves share the text formats produced by
//! [`base58`](crate::base58) and the wire layout in [`wire`](crate::wire).

use std::{fmt, str::FromStr};

use p256::ecdsa::{
    signature::hazmat::PrehashSigner, Signature as P256Signature, SigningKey, VerifyingKey,
};
use rand::RngCore;
use secp256k1::{Message, PublicKey as SecpPublicKey, SecretKey, SECP256K1};

use crate::{
    base58,
    errors::KeyError,
    types::{KeyType, PRIVATE_KEY_DATA_SIZE, PUBLIC_KEY_DATA_SIZE, SIGNATURE_DATA_SIZE},
};

/// A private key together with its derivable public half.
#[derive(Clone, Debug)]
pub enum Keypair {
    /// secp256k1 key material.
    K1(SecretKey),

    /// NIST P-256 key material.
    R1(SigningKey),
}

impl Keypair {
    /// Generates a fresh keypair with the curve's standard randomized keygen.
    pub fn generate(key_type: KeyType) -> Self {
        match key_type {
            KeyType::K1 => {
                let (sk, _) = SECP256K1.generate_keypair(&mut rand::thread_rng());
                Keypair::K1(sk)
            }
            KeyType::R1 => {
                let mut bytes = [0u8; PRIVATE_KEY_DATA_SIZE];
                loop {
                    rand::thread_rng().fill_bytes(&mut bytes);
                    // rejected only when the scalar falls outside the group
                    if let Ok(sk) = SigningKey::from_slice(&bytes) {
                        break Keypair::R1(sk);
                    }
                }
            }
        }
    }

    /// Imports a keypair from its `PVT_K1_` / `PVT_R1_` text form, deriving
    /// the public half from the private scalar.
    pub fn from_private_str(s: &str) -> Result<Self, KeyError> {
        if let Some(rest) = s.strip_prefix(KeyType::K1.private_prefix()) {
            let data = base58::string_to_key(rest, PRIVATE_KEY_DATA_SIZE, KeyType::K1.tag())?;
            let sk = SecretKey::from_slice(&data).map_err(|_| KeyError::InvalidScalar)?;
            Ok(Keypair::K1(sk))
        } else if let Some(rest) = s.strip_prefix(KeyType::R1.private_prefix()) {
            let data = base58::string_to_key(rest, PRIVATE_KEY_DATA_SIZE, KeyType::R1.tag())?;
            let sk = SigningKey::from_slice(&data).map_err(|_| KeyError::InvalidScalar)?;
            Ok(Keypair::R1(sk))
        } else {
            Err(KeyError::UnrecognizedPrefix("PVT_K1_ or PVT_R1_"))
        }
    }

    /// The curve this keypair belongs to.
    pub const fn key_type(&self) -> KeyType {
        match self {
            Keypair::K1(_) => KeyType::K1,
            Keypair::R1(_) => KeyType::R1,
        }
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Keypair::K1(sk) => PublicKey::K1(sk.public_key(SECP256K1)),
            Keypair::R1(sk) => PublicKey::R1(*sk.verifying_key()),
        }
    }

    /// Exports the 32-byte big-endian private scalar as a `PVT_` string.
    pub fn private_to_string(&self) -> String {
        let kt = self.key_type();
        match self {
            Keypair::K1(sk) => {
                base58::key_to_string(&sk.secret_bytes(), kt.tag(), kt.private_prefix())
            }
            Keypair::R1(sk) => {
                base58::key_to_string(sk.to_bytes().as_slice(), kt.tag(), kt.private_prefix())
            }
        }
    }

    /// Exports the compressed public point as a `PUB_` string.
    pub fn public_to_string(&self) -> String {
        self.public_key().to_string()
    }

    /// Signs a 32-byte transaction digest, yielding the compact `r ‖ s`
    /// signature for this keypair's curve.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> CompactSignature {
        match self {
            Keypair::K1(sk) => {
                let signature = SECP256K1.sign_ecdsa(&Message::from_digest(*digest), sk);
                CompactSignature::new(KeyType::K1, signature.serialize_compact())
            }
            Keypair::R1(sk) => {
                let signature: P256Signature =
                    sk.sign_prehash(digest).expect("32-byte prehash is valid");
                let mut rs = [0u8; SIGNATURE_DATA_SIZE];
                rs.copy_from_slice(&signature.to_bytes());
                CompactSignature::new(KeyType::R1, rs)
            }
        }
    }
}

/// A public-only curve point.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PublicKey {
    /// A point on secp256k1.
    K1(SecpPublicKey),

    /// A point on NIST P-256.
    R1(VerifyingKey),
}

impl PublicKey {
    /// The curve this point lies on.
    pub const fn key_type(&self) -> KeyType {
        match self {
            PublicKey::K1(_) => KeyType::K1,
            PublicKey::R1(_) => KeyType::R1,
        }
    }

    /// SEC1 compressed encoding: one sign byte (`0x02` even Y, `0x03` odd Y)
    /// followed by the 32-byte big-endian X coordinate.
    pub fn compressed(&self) -> [u8; PUBLIC_KEY_DATA_SIZE] {
        match self {
            PublicKey::K1(pk) => pk.serialize(),
            PublicKey::R1(vk) => vk
                .to_encoded_point(true)
                .as_bytes()
                .try_into()
                .expect("compressed SEC1 point is 33 bytes"),
        }
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix(KeyType::K1.public_prefix()) {
            let data = base58::string_to_key(rest, PUBLIC_KEY_DATA_SIZE, KeyType::K1.tag())?;
            let pk = SecpPublicKey::from_slice(&data).map_err(|_| KeyError::InvalidPoint)?;
            Ok(PublicKey::K1(pk))
        } else if let Some(rest) = s.strip_prefix(KeyType::R1.public_prefix()) {
            let data = base58::string_to_key(rest, PUBLIC_KEY_DATA_SIZE, KeyType::R1.tag())?;
            let vk = VerifyingKey::from_sec1_bytes(&data).map_err(|_| KeyError::InvalidPoint)?;
            Ok(PublicKey::R1(vk))
        } else {
            Err(KeyError::UnrecognizedPrefix("PUB_K1_ or PUB_R1_"))
        }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kt = self.key_type();
        f.write_str(&base58::key_to_string(
            &self.compressed(),
            kt.tag(),
            kt.public_prefix(),
        ))
    }
}

/// A 64-byte compact `r ‖ s` ECDSA signature and the curve it came from.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CompactSignature {
    key_type: KeyType,
    rs: [u8; SIGNATURE_DATA_SIZE],
}

impl CompactSignature {
    /// Wraps an already-serialized compact signature.
    pub const fn new(key_type: KeyType, rs: [u8; SIGNATURE_DATA_SIZE]) -> Self {
        Self { key_type, rs }
    }

    /// The curve that produced this signature.
    pub const fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The raw `r ‖ s` bytes, both big-endian, unsigned.
    pub const fn as_bytes(&self) -> &[u8; SIGNATURE_DATA_SIZE] {
        &self.rs
    }
}

#[cfg(test)]
mod tests {
    use p256::ecdsa::signature::hazmat::PrehashVerifier;

    use super::*;
    use crate::{base58, errors::Base58Error};

    #[test]
    fn generated_keys_round_trip_through_text() {
        for key_type in [KeyType::K1, KeyType::R1] {
            let keypair = Keypair::generate(key_type);
            let priv_str = keypair.private_to_string();
            let pub_str = keypair.public_to_string();

            assert!(priv_str.starts_with(key_type.private_prefix()));
            assert!(pub_str.starts_with(key_type.public_prefix()));

            let reimported = Keypair::from_private_str(&priv_str).unwrap();
            assert_eq!(reimported.key_type(), key_type);
            assert_eq!(reimported.public_to_string(), pub_str);

            let parsed: PublicKey = pub_str.parse().unwrap();
            assert_eq!(parsed, keypair.public_key());
            assert_eq!(parsed.to_string(), pub_str);
        }
    }

    #[test]
    fn generation_is_not_deterministic() {
        let a = Keypair::generate(KeyType::K1);
        let b = Keypair::generate(KeyType::K1);
        assert_ne!(a.public_to_string(), b.public_to_string());
    }

    #[test]
    fn rejects_unknown_prefixes() {
        assert_eq!(
            Keypair::from_private_str("PUB_K1_abc").unwrap_err(),
            KeyError::UnrecognizedPrefix("PVT_K1_ or PVT_R1_")
        );
        assert_eq!(
            "PVT_K1_abc".parse::<PublicKey>(),
            Err(KeyError::UnrecognizedPrefix("PUB_K1_ or PUB_R1_"))
        );
    }

    #[test]
    fn key_strings_are_bound_to_their_curve() {
        let keypair = Keypair::generate(KeyType::K1);
        let priv_str = keypair.private_to_string();

        // same base58 body, relabeled as R1
        let relabeled = priv_str.replace("PVT_K1_", "PVT_R1_");
        assert_eq!(
            Keypair::from_private_str(&relabeled).unwrap_err(),
            KeyError::Base58(Base58Error::ChecksumMismatch)
        );
    }

    #[test]
    fn rejects_zero_scalars() {
        for key_type in [KeyType::K1, KeyType::R1] {
            let encoded = base58::key_to_string(
                &[0u8; PRIVATE_KEY_DATA_SIZE],
                key_type.tag(),
                key_type.private_prefix(),
            );
            assert_eq!(
                Keypair::from_private_str(&encoded).unwrap_err(),
                KeyError::InvalidScalar
            );
        }
    }

    #[test]
    fn rejects_points_off_the_curve() {
        for key_type in [KeyType::K1, KeyType::R1] {
            // 0x05 is not a valid SEC1 compressed sign byte
            let encoded = base58::key_to_string(
                &[0x05; PUBLIC_KEY_DATA_SIZE],
                key_type.tag(),
                key_type.public_prefix(),
            );
            assert_eq!(
                encoded.parse::<PublicKey>(),
                Err(KeyError::InvalidPoint)
            );
        }
    }

    #[test]
    fn k1_signatures_verify_against_the_public_key() {
        let keypair = Keypair::generate(KeyType::K1);
        let digest = [0x42u8; 32];
        let signature = keypair.sign_digest(&digest);
        assert_eq!(signature.key_type(), KeyType::K1);

        let PublicKey::K1(pk) = keypair.public_key() else {
            panic!("K1 keypair must yield a K1 public key");
        };
        let sig = secp256k1::ecdsa::Signature::from_compact(signature.as_bytes()).unwrap();
        assert!(SECP256K1
            .verify_ecdsa(&Message::from_digest(digest), &sig, &pk)
            .is_ok());
    }

    #[test]
    fn r1_signatures_verify_against_the_public_key() {
        let keypair = Keypair::generate(KeyType::R1);
        let digest = [0x42u8; 32];
        let signature = keypair.sign_digest(&digest);
        assert_eq!(signature.key_type(), KeyType::R1);

        let PublicKey::R1(vk) = keypair.public_key() else {
            panic!("R1 keypair must yield an R1 public key");
        };
        let sig = P256Signature::from_slice(signature.as_bytes()).unwrap();
        assert!(vk.verify_prehash(&digest, &sig).is_ok());
    }
}
