pub mod json_backend;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::errors::{LedgerError, Result};
use crate::ledger::Transaction;

/// Key the browser build of the tracker used for its local-storage blob.
pub const LEDGER_KEY: &str = "financialTransactions";

/// Abstraction over string key-value persistence backends.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Copies the entry under `from` to `to` unchanged; false when `from` is absent.
    fn copy_entry(&self, from: &str, to: &str) -> Result<bool> {
        match self.get(from)? {
            Some(value) => {
                self.set(to, &value)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Serializes the full ordered transaction sequence into the stored blob.
pub fn encode_transactions(transactions: &[Transaction]) -> Result<String> {
    serde_json::to_string(transactions).map_err(|err| LedgerError::StoreWrite(err.to_string()))
}

pub fn decode_transactions(blob: &str) -> Result<Vec<Transaction>> {
    serde_json::from_str(blob).map_err(|err| LedgerError::StoreRead(err.to_string()))
}

/// Reads the sequence stored under `key`; a missing key is an empty ledger.
pub fn load_transactions(store: &dyn KeyValueStore, key: &str) -> Result<Vec<Transaction>> {
    match store.get(key)? {
        Some(blob) => decode_transactions(&blob),
        None => Ok(Vec::new()),
    }
}

/// Writes the whole sequence under `key` in a single `set` call.
pub fn save_transactions(
    store: &dyn KeyValueStore,
    key: &str,
    transactions: &[Transaction],
) -> Result<()> {
    let blob = encode_transactions(transactions)?;
    store.set(key, &blob).map_err(|err| match err {
        LedgerError::StoreWrite(message) => LedgerError::StoreWrite(message),
        other => LedgerError::StoreWrite(other.to_string()),
    })
}

/// Process-local store; clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| LedgerError::StoreWrite("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub use json_backend::JsonFileStore;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction {
                id: 10,
                description: "Salary".into(),
                amount: 1000.0,
                kind: TransactionKind::Income,
                category: "Salario".into(),
                date: "1/1/2024".into(),
            },
            Transaction {
                id: 11,
                description: "Rent".into(),
                amount: 650.25,
                kind: TransactionKind::Expense,
                category: "Vivienda".into(),
                date: "1/2/2024".into(),
            },
        ]
    }

    #[test]
    fn missing_key_loads_empty() {
        let store = MemoryStore::new();
        assert!(load_transactions(&store, LEDGER_KEY).unwrap().is_empty());
    }

    #[test]
    fn blob_round_trip_preserves_order_and_fields() {
        let store = MemoryStore::new();
        save_transactions(&store, LEDGER_KEY, &sample()).unwrap();
        assert_eq!(load_transactions(&store, LEDGER_KEY).unwrap(), sample());
    }

    #[test]
    fn malformed_blob_is_a_read_error() {
        let store = MemoryStore::new();
        store.set(LEDGER_KEY, "{not json").unwrap();
        let err = load_transactions(&store, LEDGER_KEY).unwrap_err();
        assert!(matches!(err, LedgerError::StoreRead(_)));
    }

    #[test]
    fn reads_blobs_written_by_the_browser_app() {
        let blob = r#"[{"id":1704067200000,"description":"Pago de nómina","amount":1200.5,"type":"income","category":"Salario","date":"1/1/2024"}]"#;
        let txns = decode_transactions(blob).unwrap();
        assert_eq!(txns[0].kind, TransactionKind::Income);
        assert_eq!(txns[0].amount, 1200.5);
    }
}
