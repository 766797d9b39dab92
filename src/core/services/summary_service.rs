use crate::core::palette::{generate_colors, Hsl};
use crate::ledger::{categories_for, Ledger, TransactionKind};

/// Dashboard totals for a ledger snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSummary {
    pub balance: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub transaction_count: usize,
}

/// One slice of the per-category chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
    pub count: usize,
    /// Fraction of the kind's total, in `0.0..=1.0`.
    pub share: f64,
    pub color: Hsl,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(ledger: &Ledger) -> LedgerSummary {
        LedgerSummary {
            balance: ledger.balance(),
            total_income: ledger.total_income(),
            total_expense: ledger.total_expense(),
            transaction_count: ledger.len(),
        }
    }

    /// Totals per category for one kind, vocabulary order first, then unknown
    /// categories in the order they were first recorded. Empty categories are omitted.
    pub fn category_breakdown(ledger: &Ledger, kind: TransactionKind) -> Vec<CategoryTotal> {
        let mut buckets: Vec<(String, f64, usize)> = categories_for(kind)
            .iter()
            .map(|name| (name.to_string(), 0.0, 0))
            .collect();

        for txn in ledger.iter().filter(|txn| txn.kind == kind) {
            match buckets.iter_mut().find(|(name, _, _)| *name == txn.category) {
                Some(bucket) => {
                    bucket.1 += txn.amount;
                    bucket.2 += 1;
                }
                None => buckets.push((txn.category.clone(), txn.amount, 1)),
            }
        }
        buckets.retain(|(_, _, count)| *count > 0);

        let grand_total: f64 = buckets.iter().map(|(_, total, _)| total).sum();
        let colors = generate_colors(buckets.len());
        buckets
            .into_iter()
            .zip(colors)
            .map(|((category, total, count), color)| CategoryTotal {
                share: if grand_total > 0.0 {
                    total / grand_total
                } else {
                    0.0
                },
                category,
                total,
                count,
                color,
            })
            .collect()
    }
}
