//! Amount parsing and display helpers shared by the ledger and the CLI.

use crate::errors::{LedgerError, Result};

pub const DEFAULT_SYMBOL: &str = "$";

/// Visual treatment for an amount on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountTone {
    Positive,
    Negative,
}

impl AmountTone {
    pub fn of(value: f64) -> Self {
        if value >= 0.0 {
            AmountTone::Positive
        } else {
            AmountTone::Negative
        }
    }
}

/// Parses user-supplied amount text into a finite, non-negative magnitude.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::Validation("amount is required".into()));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| LedgerError::Validation(format!("`{trimmed}` is not a valid amount")))?;
    if !value.is_finite() {
        return Err(LedgerError::Validation(format!(
            "`{trimmed}` is not a finite amount"
        )));
    }
    if value < 0.0 {
        return Err(LedgerError::Validation(
            "amount must not be negative; use the transaction kind for direction".into(),
        ));
    }
    // `-0` passes the sign check above.
    Ok(value.abs())
}

/// Renders an amount with two decimals and a leading symbol, e.g. `-$12.00`.
pub fn format_amount(value: f64, symbol: &str) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded < 0.0 {
        format!("-{symbol}{:.2}", rounded.abs())
    } else {
        format!("{symbol}{:.2}", rounded.abs())
    }
}
