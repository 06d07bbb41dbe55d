//! In-process gateway with per-key failure injection.

use super::{PersistenceError, PersistenceGateway, PersistenceResult, StorageKey};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

/// Map-backed gateway. Contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    records: RefCell<BTreeMap<StorageKey, Vec<u8>>>,
    failing: RefCell<BTreeSet<StorageKey>>,
    writes: Cell<usize>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` for `key` fail with `Unavailable`.
    pub fn fail_saves_for(&self, key: StorageKey) {
        self.failing.borrow_mut().insert(key);
    }

    /// Lifts every failure set by `fail_saves_for`.
    pub fn clear_failures(&self) {
        self.failing.borrow_mut().clear();
    }

    /// Keys currently holding a record.
    pub fn keys(&self) -> Vec<StorageKey> {
        self.records.borrow().keys().copied().collect()
    }

    /// Number of successful `save` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self, key: StorageKey) -> PersistenceResult<Option<Vec<u8>>> {
        Ok(self.records.borrow().get(&key).cloned())
    }

    fn save(&self, key: StorageKey, bytes: &[u8]) -> PersistenceResult<()> {
        if self.failing.borrow().contains(&key) {
            return Err(PersistenceError::Unavailable {
                key,
                reason: "write rejected".to_string(),
            });
        }
        self.records.borrow_mut().insert(key, bytes.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: StorageKey) -> PersistenceResult<()> {
        self.records.borrow_mut().remove(&key);
        Ok(())
    }
}
