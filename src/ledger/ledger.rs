use std::fmt::Write;

use chrono::{
    format::{Item, StrftimeItems},
    DateTime, Local,
};

use crate::currency::parse_amount;
use crate::errors::{LedgerError, Result};

use super::transaction::{Transaction, TransactionId, TransactionKind};

pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Rejects strftime patterns chrono cannot render.
pub fn validate_date_format(format: &str) -> Result<()> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(invalid_date_format(format));
    }
    Ok(())
}

/// Ordered transaction sequence plus the aggregates derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    date_format: String,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::from_transactions(Vec::new())
    }

    /// Wraps previously stored records without re-validating them.
    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Validates the inputs and appends a new record stamped with the current time.
    pub fn append(
        &mut self,
        description: &str,
        amount: &str,
        kind: TransactionKind,
        category: &str,
    ) -> Result<Transaction> {
        self.append_at(description, amount, kind, category, Local::now())
    }

    /// Same as [`Ledger::append`] with an explicit creation instant.
    pub fn append_at(
        &mut self,
        description: &str,
        amount: &str,
        kind: TransactionKind,
        category: &str,
        now: DateTime<Local>,
    ) -> Result<Transaction> {
        let description = required_text("description", description)?;
        let category = required_text("category", category)?;
        let amount = parse_amount(amount)?;
        let id = self.next_id(now.timestamp_millis())?;
        let mut date = String::new();
        write!(date, "{}", now.format(&self.date_format))
            .map_err(|_| invalid_date_format(&self.date_format))?;

        let transaction = Transaction {
            id,
            description,
            amount,
            kind,
            category,
            date,
        };
        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Removes the first record with a matching id, returning it with its former position.
    pub fn remove(&mut self, id: TransactionId) -> Option<(usize, Transaction)> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some((index, self.transactions.remove(index)))
    }

    pub(crate) fn pop(&mut self) -> Option<Transaction> {
        self.transactions.pop()
    }

    pub(crate) fn insert(&mut self, index: usize, transaction: Transaction) {
        let index = index.min(self.transactions.len());
        self.transactions.insert(index, transaction);
    }

    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn total_income(&self) -> f64 {
        self.total_for(TransactionKind::Income)
    }

    pub fn total_expense(&self) -> f64 {
        self.total_for(TransactionKind::Expense)
    }

    pub fn total_for(&self, kind: TransactionKind) -> f64 {
        self.transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .map(|txn| txn.amount)
            .sum()
    }

    /// Next id: the creation millisecond, bumped past the newest existing id on collision.
    fn next_id(&self, now_millis: i64) -> Result<TransactionId> {
        match self.transactions.iter().map(|txn| txn.id).max() {
            Some(last) if last >= now_millis => last
                .checked_add(1)
                .ok_or_else(|| LedgerError::Validation("id space exhausted".into())),
            _ => Ok(now_millis),
        }
    }
}

fn invalid_date_format(format: &str) -> LedgerError {
    LedgerError::Config(format!("`{format}` is not a valid date format"))
}

fn required_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
