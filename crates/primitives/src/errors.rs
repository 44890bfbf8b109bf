//! Error types for the key text codecs and key material.

use thiserror::Error;

/// Error while decoding a Base58Check string.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum Base58Error {
    /// The string contains a character outside the 58-symbol alphabet.
    #[error("invalid base-58 character {0:?}")]
    InvalidCharacter(char),

    /// The decoded value does not fit the expected payload width.
    #[error("base-58 value is out of range")]
    OutOfRange,

    /// The carried 4-byte checksum does not match the payload.
    #[error("checksum doesn't match")]
    ChecksumMismatch,
}

/// Error while importing key material from its text form.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum KeyError {
    /// The Base58Check layer rejected the string.
    #[error(transparent)]
    Base58(#[from] Base58Error),

    /// The string did not begin with any known key prefix.
    #[error("key string must begin with {0}")]
    UnrecognizedPrefix(&'static str),

    /// The decoded private scalar is not a valid key for the curve.
    #[error("private key scalar is not valid for the curve")]
    InvalidScalar,

    /// The decoded compressed point does not lie on the curve.
    #[error("public key point does not lie on the curve")]
    InvalidPoint,
}
