use crate::core::services::SummaryService;
use crate::ledger::{Ledger, Transaction, TransactionKind};

fn txn(id: i64, kind: TransactionKind, category: &str, amount: f64) -> Transaction {
    Transaction {
        id,
        description: format!("entry {id}"),
        amount,
        kind,
        category: category.into(),
        date: "1/1/2024".into(),
    }
}

fn sample_ledger() -> Ledger {
    Ledger::from_transactions(vec![
        txn(1, TransactionKind::Income, "Salario", 1000.0),
        txn(2, TransactionKind::Expense, "Transporte", 40.0),
        txn(3, TransactionKind::Expense, "Mascotas", 20.0),
        txn(4, TransactionKind::Expense, "Alimentación", 100.0),
        txn(5, TransactionKind::Expense, "Alimentación", 40.0),
    ])
}

#[test]
fn summarize_matches_ledger_aggregates() {
    let ledger = sample_ledger();
    let summary = SummaryService::summarize(&ledger);
    assert_eq!(summary.total_income, 1000.0);
    assert_eq!(summary.total_expense, 200.0);
    assert_eq!(summary.balance, 800.0);
    assert_eq!(summary.transaction_count, 5);
}

#[test]
fn breakdown_orders_vocabulary_before_unknown_categories() {
    let rows = SummaryService::category_breakdown(&sample_ledger(), TransactionKind::Expense);
    let names: Vec<&str> = rows.iter().map(|row| row.category.as_str()).collect();
    assert_eq!(names, ["Alimentación", "Transporte", "Mascotas"]);
    assert_eq!(rows[0].total, 140.0);
    assert_eq!(rows[0].count, 2);
    assert_eq!(rows[0].share, 0.7);
}

#[test]
fn breakdown_shares_sum_to_one() {
    let rows = SummaryService::category_breakdown(&sample_ledger(), TransactionKind::Expense);
    let total_share: f64 = rows.iter().map(|row| row.share).sum();
    assert!((total_share - 1.0).abs() < 1e-9);
}

#[test]
fn breakdown_assigns_distinct_colors() {
    let rows = SummaryService::category_breakdown(&sample_ledger(), TransactionKind::Expense);
    assert_ne!(rows[0].color, rows[1].color);
    assert_eq!(rows[0].color.to_string(), "hsl(0, 70%, 60%)");
}

#[test]
fn empty_kind_has_no_rows() {
    let ledger = Ledger::from_transactions(vec![txn(1, TransactionKind::Expense, "Salud", 5.0)]);
    assert!(SummaryService::category_breakdown(&ledger, TransactionKind::Income).is_empty());
}
