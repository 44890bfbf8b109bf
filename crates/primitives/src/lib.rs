//! Key-handling primitives for the keyfort vault: the Base58Check text codec
//! for key strings, elliptic-curve key material for the K1 (secp256k1) and
//! R1 (NIST P-256) curves, and the variant-tagged binary wire encoding
//! consumed by the chain-side signature verifier.
//!
//! This crate lies at the bottom of the crate-hierarchy in this workspace
//! i.e., it does not depend on any other crate in this workspace.

pub mod base58;
pub mod errors;
pub mod keys;
pub mod types;
pub mod wire;
