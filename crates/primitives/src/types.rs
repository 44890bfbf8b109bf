//! Shared key-type and size definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of bytes in a raw private scalar.
pub const PRIVATE_KEY_DATA_SIZE: usize = 32;

/// Number of bytes in a SEC1 compressed public point.
pub const PUBLIC_KEY_DATA_SIZE: usize = 33;

/// Number of bytes in a compact `r ‖ s` signature.
pub const SIGNATURE_DATA_SIZE: usize = 64;

/// The elliptic curve a piece of key material belongs to.
///
/// The numeric value doubles as the variant tag in the wire encoding, so the
/// discriminants are part of the chain-side contract and must not change.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyType {
    /// secp256k1.
    K1 = 0,

    /// NIST P-256 (a.k.a. secp256r1 or prime256v1).
    R1 = 1,
}

impl KeyType {
    /// Two-letter curve tag bound into Base58Check checksums.
    pub const fn tag(&self) -> &'static str {
        match self {
            KeyType::K1 => "K1",
            KeyType::R1 => "R1",
        }
    }

    /// Text prefix for private keys of this curve.
    pub const fn private_prefix(&self) -> &'static str {
        match self {
            KeyType::K1 => "PVT_K1_",
            KeyType::R1 => "PVT_R1_",
        }
    }

    /// Text prefix for public keys of this curve.
    pub const fn public_prefix(&self) -> &'static str {
        match self {
            KeyType::K1 => "PUB_K1_",
            KeyType::R1 => "PUB_R1_",
        }
    }

    /// Variant tag used in the wire encoding.
    pub const fn wire_tag(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
