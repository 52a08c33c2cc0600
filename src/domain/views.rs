use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Cents, Transaction, TransactionKind};

/// The combination of month-prefix and free-text search constraining which
/// transactions a view considers. `None` and the empty string both mean
/// "no constraint".
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Matched as a prefix of the ISO date, so "2024" and "2024-05" both work.
    pub month: Option<String>,
    /// Case-insensitive substring match on category or note.
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let month_ok = match self.month.as_deref() {
            None | Some("") => true,
            Some(prefix) => transaction.date_str().starts_with(prefix),
        };
        if !month_ok {
            return false;
        }

        match self.search.as_deref() {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                transaction.category.to_lowercase().contains(&query)
                    || transaction.note.to_lowercase().contains(&query)
            }
        }
    }
}

/// Summed amounts per kind over a set of transactions.
/// `balance = income - expense` by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Cents,
    pub expense: Cents,
    pub balance: Cents,
}

/// Select the transactions matching `filter`, preserving insertion order.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
) -> Vec<&'a Transaction> {
    transactions.iter().filter(|t| filter.matches(t)).collect()
}

/// Sum income and expense amounts over the transactions matching `filter`.
pub fn compute_totals(transactions: &[Transaction], filter: &TransactionFilter) -> Totals {
    let mut totals = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .fold(Totals::default(), |mut acc, t| {
            match t.kind {
                TransactionKind::Income => acc.income += t.amount_cents,
                TransactionKind::Expense => acc.expense += t.amount_cents,
            }
            acc
        });
    totals.balance = totals.income - totals.expense;
    totals
}

/// Sum expense amounts per category over the transactions matching `filter`.
/// Income transactions are excluded. Returns a map of category -> total.
pub fn category_breakdown(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> HashMap<String, Cents> {
    let mut grouped: HashMap<String, Cents> = HashMap::new();

    for t in transactions
        .iter()
        .filter(|t| t.is_expense() && filter.matches(t))
    {
        *grouped.entry(t.category.clone()).or_insert(0) += t.amount_cents;
    }

    grouped
}

/// Order transactions for presentation: most recent date first, ties broken
/// by insertion order (the sort is stable).
pub fn sort_for_display(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.date.cmp(&a.date));
}
