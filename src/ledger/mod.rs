//! Ledger domain models and the static category vocabulary.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{canonical_category, categories_for};
pub use ledger::{validate_date_format, Ledger, DEFAULT_DATE_FORMAT};
pub use transaction::{Transaction, TransactionId, TransactionKind};
