#![doc(test(attr(deny(warnings))))]

//! finplan records income and expense transactions, keeps them in a key-value
//! store, and reports the running balance alongside income and expense totals.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::LedgerManager;
pub use errors::{LedgerError, Result};
pub use ledger::{Ledger, Transaction, TransactionId, TransactionKind};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("finplan tracing initialized");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
