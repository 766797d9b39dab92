use tracing::{error, info, warn};

use crate::config::{Config, LoadPolicy};
use crate::errors::{LedgerError, Result};
use crate::ledger::{categories_for, Ledger, Transaction, TransactionId, TransactionKind};
use crate::storage::{self, KeyValueStore};

/// Suffix for the key under which an undecodable blob is set aside.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Facade that owns the ledger and keeps its store in step with every mutation.
pub struct LedgerManager {
    ledger: Ledger,
    key: String,
    storage: Box<dyn KeyValueStore>,
}

impl LedgerManager {
    /// Hydrates the ledger stored under `key`.
    pub fn open(
        storage: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        policy: LoadPolicy,
    ) -> Result<Self> {
        let key = key.into();
        let transactions = match storage::load_transactions(storage.as_ref(), &key) {
            Ok(transactions) => transactions,
            Err(LedgerError::StoreRead(reason)) if policy == LoadPolicy::StartEmpty => {
                set_aside_corrupt_blob(storage.as_ref(), &key, &reason)?;
                Vec::new()
            }
            Err(err) => return Err(err),
        };
        info!(key = %key, count = transactions.len(), "ledger loaded");
        Ok(Self {
            ledger: Ledger::from_transactions(transactions),
            key,
            storage,
        })
    }

    /// Opens the ledger described by the user's configuration.
    pub fn from_config(storage: Box<dyn KeyValueStore>, config: &Config) -> Result<Self> {
        let mut manager = Self::open(storage, config.store_key.clone(), config.on_corrupt_store)?;
        manager.ledger = manager.ledger.with_date_format(config.date_format.clone());
        Ok(manager)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.ledger.transactions()
    }

    /// Reads the persisted sequence without touching the in-memory ledger.
    pub fn load(&self) -> Result<Vec<Transaction>> {
        storage::load_transactions(self.storage.as_ref(), &self.key)
    }

    /// Replaces the in-memory ledger with what the store currently holds.
    pub fn reload(&mut self) -> Result<()> {
        let transactions = self.load()?;
        let format = self.ledger.date_format().to_string();
        self.ledger = Ledger::from_transactions(transactions).with_date_format(format);
        Ok(())
    }

    /// Records a new transaction and persists the full ledger.
    pub fn append(
        &mut self,
        description: &str,
        amount: &str,
        kind: TransactionKind,
        category: &str,
    ) -> Result<Transaction> {
        let transaction = self.ledger.append(description, amount, kind, category)?;
        if let Err(err) = self.persist() {
            self.ledger.pop();
            return Err(err);
        }
        info!(id = transaction.id, kind = %kind, amount = transaction.amount, "transaction added");
        Ok(transaction)
    }

    /// Deletes the transaction with `id`; returns false when nothing matched.
    pub fn remove(&mut self, id: TransactionId) -> Result<bool> {
        let Some((index, removed)) = self.ledger.remove(id) else {
            return Ok(false);
        };
        if let Err(err) = self.persist() {
            self.ledger.insert(index, removed);
            return Err(err);
        }
        info!(id, "transaction removed");
        Ok(true)
    }

    pub fn balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn total_income(&self) -> f64 {
        self.ledger.total_income()
    }

    pub fn total_expense(&self) -> f64 {
        self.ledger.total_expense()
    }

    pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
        categories_for(kind)
    }

    fn persist(&self) -> Result<()> {
        storage::save_transactions(self.storage.as_ref(), &self.key, self.ledger.transactions())
            .inspect_err(|err| error!(key = %self.key, %err, "failed to persist ledger"))
    }
}

fn set_aside_corrupt_blob(store: &dyn KeyValueStore, key: &str, reason: &str) -> Result<()> {
    let backup_key = format!("{key}{CORRUPT_SUFFIX}");
    store.copy_entry(key, &backup_key)?;
    warn!(key, backup = %backup_key, reason, "stored ledger unreadable; starting empty");
    Ok(())
}
