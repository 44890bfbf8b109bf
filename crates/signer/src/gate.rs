//! Authorization-gated signing over vault-held keys.
//!
//! Every failure mode presents identically to the caller as "no proof": an
//! unauthorized caller, an unknown public key, and undecodable stored key
//! material all yield `None`, so a hostile applet cannot learn which case it
//! hit. Diagnostics go to the log only.

use std::{fmt, sync::Arc};

use keyfort_db::{storage::VaultStorage, vault::KeyVault};
use keyfort_primitives::{keys::Keypair, wire};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Identity of the message-transport caller asking for a proof.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct CallerId(String);

impl CallerId {
    /// Creates a caller identity from its transport name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The transport name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Assertion naming which vault key must produce the signature.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SigningClaim {
    /// Text-encoded public key of the vault entry to sign with.
    #[serde(rename = "pubkey")]
    pub public_key: String,
}

/// Signs transaction digests with vault keys on behalf of one trusted
/// caller.
#[derive(Debug)]
pub struct SigningGate<S> {
    vault: Arc<KeyVault<S>>,
    trusted_caller: CallerId,
}

impl<S: VaultStorage> SigningGate<S> {
    /// Creates a gate over `vault` that only honors requests from
    /// `trusted_caller`.
    pub const fn new(vault: Arc<KeyVault<S>>, trusted_caller: CallerId) -> Self {
        Self {
            vault,
            trusted_caller,
        }
    }

    /// Produces a wire-encoded signature over `digest` with the key named in
    /// `claim`, or `None` if no proof can be given.
    pub fn get_proof(
        &self,
        caller: &CallerId,
        claim: &SigningClaim,
        digest: &[u8; 32],
    ) -> Option<Vec<u8>> {
        if *caller != self.trusted_caller {
            warn!(%caller, "rejecting proof request from untrusted caller");
            return None;
        }

        let entry = match self.vault.find_by_public_key(&claim.public_key) {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(err) => {
                warn!(%err, "vault lookup failed during proof request");
                return None;
            }
        };

        let keypair = match Keypair::from_private_str(&entry.private_key) {
            Ok(keypair) => keypair,
            Err(err) => {
                warn!(public_key = %entry.public_key, %err, "stored private key failed to decode");
                return None;
            }
        };

        let signature = keypair.sign_digest(digest);
        Some(wire::encode_signature(&signature))
    }

    /// Lowercase-hex rendering of [`get_proof`](Self::get_proof) for
    /// transports that carry proofs as text.
    pub fn get_proof_hex(
        &self,
        caller: &CallerId,
        claim: &SigningClaim,
        digest: &[u8; 32],
    ) -> Option<String> {
        self.get_proof(caller, claim, digest).map(hex::encode)
    }
}
