//! Ledger orchestration, reporting services, and chart helpers.

pub mod ledger_manager;
pub mod palette;
pub mod services;

pub use ledger_manager::LedgerManager;
