//! The key vault and its merge logic.
//!
//! Every operation is a critical section: the vault lock is held across the
//! whole load-compute-store window, so an operation issued after
//! [`KeyVault::add_accounts`] returns always observes that merge's effects.
//! Snapshots are replaced wholesale on every mutation; there is no
//! incremental persistence format and no delete API.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{errors::VaultResult, storage::VaultStorage};

/// Name of an on-chain account.
pub type AccountId = String;

/// One stored key with the accounts it is known to authenticate.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    /// Text-encoded public key, unique across a snapshot.
    pub public_key: String,

    /// Text-encoded private key for the same pair.
    pub private_key: String,

    /// Accounts this key authenticates, in first-seen order, no duplicates.
    #[serde(default)]
    pub known_accounts: Vec<AccountId>,
}

/// One record in an [`KeyVault::add_accounts`] batch: an account being
/// assigned to a key.
#[derive(Debug, Clone)]
pub struct AccountWithKey {
    /// The account being claimed.
    pub account: AccountId,

    /// The public key that owns the account from now on.
    pub public_key: String,

    /// Private key material; records without it cannot create or update an
    /// entry and are dropped by the merge.
    pub private_key: Option<String>,
}

/// A vault instance bound to an injected storage collaborator.
///
/// All operations are synchronous bounded CPU work plus one storage
/// read/write; a single lock serializes them per instance.
#[derive(Debug)]
pub struct KeyVault<S> {
    storage: Mutex<S>,
}

impl<S: VaultStorage> KeyVault<S> {
    /// Creates a vault over the given storage collaborator.
    pub const fn new(storage: S) -> Self {
        Self {
            storage: Mutex::new(storage),
        }
    }

    fn load(storage: &S) -> VaultResult<Vec<VaultEntry>> {
        match storage.read()? {
            Some(blob) => Ok(serde_json::from_slice(&blob)?),
            None => Ok(Vec::new()),
        }
    }

    fn store(storage: &S, entries: &[VaultEntry]) -> VaultResult<()> {
        let blob = serde_json::to_vec(entries)?;
        storage.write(&blob)?;
        Ok(())
    }

    /// Lists every account known to the vault, deduplicated, in first-seen
    /// order.
    ///
    /// An account recorded under more than one key is reported once and
    /// logged as a conflict; lookup by account may pick the wrong key for it.
    pub fn accounts(&self) -> VaultResult<Vec<AccountId>> {
        let storage = self.storage.lock();
        let entries = Self::load(&storage)?;

        warn_conflicts(&entries);

        let mut seen: Vec<AccountId> = Vec::new();
        for entry in &entries {
            for account in &entry.known_accounts {
                if !seen.contains(account) {
                    seen.push(account.clone());
                }
            }
        }
        Ok(seen)
    }

    /// Looks up the entry holding the given text-encoded public key.
    pub fn find_by_public_key(&self, public_key: &str) -> VaultResult<Option<VaultEntry>> {
        let storage = self.storage.lock();
        let entries = Self::load(&storage)?;
        Ok(entries.into_iter().find(|e| e.public_key == public_key))
    }

    /// Inserts a bare keypair with no account associations.
    ///
    /// A keypair whose public key is already present is left untouched.
    pub fn store_key(&self, public_key: &str, private_key: &str) -> VaultResult<()> {
        let storage = self.storage.lock();
        let mut entries = Self::load(&storage)?;

        if entries.iter().any(|e| e.public_key == public_key) {
            return Ok(());
        }

        entries.push(VaultEntry {
            public_key: public_key.to_owned(),
            private_key: private_key.to_owned(),
            known_accounts: Vec::new(),
        });
        Self::store(&storage, &entries)
    }

    /// Merges a batch of account-to-key assignments into the vault.
    ///
    /// The merge guarantees:
    ///
    /// 1. incoming records lacking a private key are dropped;
    /// 2. every account named in the surviving batch is stripped from
    ///    existing entries, so an account is claimed by one entry going
    ///    forward;
    /// 3. existing and incoming entries sharing a public key are coalesced,
    ///    their account lists unioned (the existing entry's private key
    ///    wins);
    /// 4. the resulting snapshot, one entry per distinct public key,
    ///    replaces the stored one wholesale;
    /// 5. an account that still ends up under two keys is logged as a
    ///    conflict and left as-is.
    ///
    /// Replaying an identical batch yields an identical snapshot.
    pub fn add_accounts(&self, incoming: Vec<AccountWithKey>) -> VaultResult<()> {
        let storage = self.storage.lock();

        let incoming: Vec<VaultEntry> = incoming
            .into_iter()
            .filter_map(|record| {
                record.private_key.map(|private_key| VaultEntry {
                    public_key: record.public_key,
                    private_key,
                    known_accounts: vec![record.account],
                })
            })
            .collect();
        if incoming.is_empty() {
            return Ok(());
        }

        let covered: Vec<&AccountId> = incoming
            .iter()
            .flat_map(|entry| &entry.known_accounts)
            .collect();

        let mut entries = Self::load(&storage)?;
        for entry in &mut entries {
            entry
                .known_accounts
                .retain(|account| !covered.contains(&account));
        }

        let mut merged: Vec<VaultEntry> = Vec::new();
        for entry in entries.into_iter().chain(incoming) {
            match merged.iter_mut().find(|m| m.public_key == entry.public_key) {
                Some(existing) => {
                    for account in entry.known_accounts {
                        if !existing.known_accounts.contains(&account) {
                            existing.known_accounts.push(account);
                        }
                    }
                }
                None => merged.push(entry),
            }
        }

        warn_conflicts(&merged);
        Self::store(&storage, &merged)
    }
}

/// Logs one warning per account recorded under more than one public key.
fn warn_conflicts(entries: &[VaultEntry]) {
    let mut owners: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for entry in entries {
        for account in &entry.known_accounts {
            owners
                .entry(account.as_str())
                .or_default()
                .push(entry.public_key.as_str());
        }
    }

    for (account, keys) in owners {
        if keys.len() > 1 {
            warn!(
                %account,
                ?keys,
                "multiple keys recorded for one account; signing may pick the wrong one"
            );
        }
    }
}
