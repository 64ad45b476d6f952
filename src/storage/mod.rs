pub mod json_backend;

use std::sync::{Arc, Mutex};

use crate::{errors::StorageError, ledger::BudgetRecord};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Abstraction over the durable home of the single budget record.
pub trait RecordStore: Send + Sync {
    /// Loads the stored record, substituting defaults for unreadable contents.
    fn load(&self) -> Result<BudgetRecord>;
    /// Overwrites the stored record in full.
    fn save(&self, record: &BudgetRecord) -> Result<()>;
}

pub use json_backend::JsonStore;

/// Volatile store used by tests and dry runs.
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the ledger last persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<BudgetRecord>>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Option<BudgetRecord> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|count| *count).unwrap_or_default()
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<BudgetRecord> {
        Ok(self.stored().unwrap_or_default())
    }

    fn save(&self, record: &BudgetRecord) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(record.clone());
        }
        if let Ok(mut count) = self.saves.lock() {
            *count += 1;
        }
        Ok(())
    }
}
