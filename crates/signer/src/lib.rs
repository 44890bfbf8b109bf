//! The signing gate: produces wire-encoded transaction signatures from
//! vault-held keys, but only for the one trusted transport caller.

pub mod gate;

pub use gate::{CallerId, SigningClaim, SigningGate};
