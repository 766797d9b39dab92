pub mod summary_service;

pub use summary_service::{CategoryTotal, LedgerSummary, SummaryService};

#[cfg(test)]
mod tests;
