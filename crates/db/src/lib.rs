//! Durable key vault: a mapping from a text-encoded public key to its
//! private key material and the set of accounts that key authenticates,
//! persisted wholesale through an injected storage collaborator.

pub mod errors;
pub mod storage;
pub mod vault;
