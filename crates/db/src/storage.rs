//! Storage abstraction for the vault's persisted snapshot.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::errors::StorageError;

/// Durability collaborator for a vault instance.
///
/// The vault serializes its entire entry list into one blob under a single
/// named slot; an absent slot is an empty vault, not an error. Implementors
/// bind this to whatever key-value store the host provides (browser local
/// storage, a file, a test double).
pub trait VaultStorage {
    /// Reads the snapshot blob, if one has been written.
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the snapshot blob wholesale.
    fn write(&self, blob: &[u8]) -> Result<(), StorageError>;
}

/// In-memory storage for tests and ephemeral vaults.
///
/// Clones share the same slot, so two vault instances constructed over
/// clones of one [`InMemoryStorage`] observe each other's snapshots.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    slot: Arc<Mutex<Option<Vec<u8>>>>,
}

impl VaultStorage for InMemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.slot.lock().clone())
    }

    fn write(&self, blob: &[u8]) -> Result<(), StorageError> {
        *self.slot.lock() = Some(blob.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_slot_reads_as_none() {
        let storage = InMemoryStorage::default();
        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn clones_share_the_slot() {
        let storage = InMemoryStorage::default();
        let other = storage.clone();

        storage.write(b"snapshot").unwrap();
        assert_eq!(other.read().unwrap(), Some(b"snapshot".to_vec()));
    }
}
