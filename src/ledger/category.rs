use super::transaction::TransactionKind;

const INCOME_CATEGORIES: [&str; 5] = ["Salario", "Freelance", "Inversiones", "Regalos", "Otros"];

const EXPENSE_CATEGORIES: [&str; 7] = [
    "Alimentación",
    "Transporte",
    "Vivienda",
    "Entretenimiento",
    "Salud",
    "Educación",
    "Otros",
];

/// Fixed category vocabulary offered for each transaction kind.
pub fn categories_for(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => &INCOME_CATEGORIES,
        TransactionKind::Expense => &EXPENSE_CATEGORIES,
    }
}

/// Case-insensitive lookup into the vocabulary, returning the canonical spelling.
pub fn canonical_category(kind: TransactionKind, input: &str) -> Option<&'static str> {
    let needle = input.trim().to_lowercase();
    categories_for(kind)
        .iter()
        .copied()
        .find(|name| name.to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_sizes_match_kind() {
        assert_eq!(categories_for(TransactionKind::Income).len(), 5);
        assert_eq!(categories_for(TransactionKind::Expense).len(), 7);
        assert_eq!(categories_for(TransactionKind::Expense)[0], "Alimentación");
    }

    #[test]
    fn canonical_lookup_ignores_case() {
        assert_eq!(
            canonical_category(TransactionKind::Expense, "alimentación"),
            Some("Alimentación")
        );
        assert_eq!(canonical_category(TransactionKind::Income, "Vivienda"), None);
    }
}
