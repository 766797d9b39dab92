#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use finplan::{
    config::LoadPolicy,
    storage::{KeyValueStore, MemoryStore, LEDGER_KEY},
    LedgerError, LedgerManager,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_home() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn open_manager(store: &MemoryStore) -> LedgerManager {
    LedgerManager::open(Box::new(store.clone()), LEDGER_KEY, LoadPolicy::Fail)
        .expect("open ledger")
}

/// Memory store whose writes can be switched to fail on demand.
#[derive(Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing: Arc<AtomicBool>,
}

impl FlakyStore {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> finplan::Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> finplan::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(LedgerError::StoreWrite("disk full".into()));
        }
        self.inner.set(key, value)
    }
}
