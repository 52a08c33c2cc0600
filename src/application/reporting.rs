use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::Cents;

/// Per-category expense distribution shaped for presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownReport {
    pub categories: Vec<CategoryShare>,
    pub total: Cents,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Cents,
    /// Share of the filtered expense total, in percent.
    pub share: f64,
}

/// Shape a category -> amount map into a report sorted by amount descending,
/// ties broken alphabetically so output is deterministic.
pub fn build_breakdown_report(grouped: HashMap<String, Cents>) -> BreakdownReport {
    let total: Cents = grouped.values().sum();

    let mut categories: Vec<CategoryShare> = grouped
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            category,
            total: amount,
            share: if total > 0 {
                amount as f64 * 100.0 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    categories.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));

    BreakdownReport { categories, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_breakdown() {
        let report = build_breakdown_report(HashMap::new());
        assert!(report.categories.is_empty());
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_breakdown_sorted_and_shares_sum_to_hundred() {
        let grouped = HashMap::from([
            ("Food".to_string(), 3000),
            ("Rent".to_string(), 6000),
            ("Transport".to_string(), 1000),
        ]);

        let report = build_breakdown_report(grouped);
        assert_eq!(report.total, 10000);

        let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["Rent", "Food", "Transport"]);

        let share_sum: f64 = report.categories.iter().map(|c| c.share).sum();
        assert!((share_sum - 100.0).abs() < 1e-9);
        assert!((report.categories[0].share - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let grouped = HashMap::from([("Zoo".to_string(), 500), ("Art".to_string(), 500)]);

        let report = build_breakdown_report(grouped);
        let names: Vec<&str> = report.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["Art", "Zoo"]);
    }
}
