// 👥 Participant Resolver
// Who shares the cost of an expense, with the dataset-wide fallback rule.

use crate::expense::Expense;
use std::collections::HashSet;

/// Distinct union of every payer and participant across the whole set
///
/// First-encounter order: for each expense its payer, then its participants.
/// A pure function of the list, so one aggregation pass computes it once and
/// reuses it for every expense without an explicit split.
pub fn distinct_names(expenses: &[Expense]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();

    for expense in expenses {
        let candidates = std::iter::once(&expense.paid_by).chain(expense.participants.iter());
        for name in candidates {
            if !name.is_empty() && seen.insert(name.as_str()) {
                names.push(name.clone());
            }
        }
    }

    names
}

/// Resolve the sharers of `expense` given the precomputed roster `everyone`
///
/// - explicit split: the listed names, plus the payer when no listed name
///   matches it case-insensitively
/// - no split: the whole roster, plus the payer if missing from it
pub fn resolve_with(expense: &Expense, everyone: &[String]) -> Vec<String> {
    let payer = expense.paid_by.as_str();

    if !expense.participants.is_empty() {
        let mut resolved = expense.participants.clone();
        if !payer.is_empty() && !contains_ignore_case(&resolved, payer) {
            resolved.push(payer.to_string());
        }
        return resolved;
    }

    let mut resolved = everyone.to_vec();
    if !payer.is_empty() && !resolved.iter().any(|name| name == payer) {
        resolved.push(payer.to_string());
    }
    resolved
}

/// Resolve against the full set, deriving the roster on the spot
pub fn resolve_participants(expenses: &[Expense], target: &Expense) -> Vec<String> {
    let everyone = distinct_names(expenses);
    resolve_with(target, &everyone)
}

fn contains_ignore_case(names: &[String], needle: &str) -> bool {
    let needle = needle.to_lowercase();
    names.iter().any(|name| name.to_lowercase() == needle)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payer_appended_when_missing() {
        let expense = Expense::new("2024-01-01", "Food", 30.0, "Carol").with_participants(&["Alice", "Bob"]);
        let resolved = resolve_participants(&[expense.clone()], &expense);
        assert_eq!(resolved, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_payer_not_appended_when_listed_with_other_case() {
        let expense = Expense::new("2024-01-01", "Food", 30.0, "ALICE").with_participants(&["alice", "Bob"]);
        let resolved = resolve_participants(&[expense.clone()], &expense);
        assert_eq!(resolved, vec!["alice", "Bob"]);
    }

    #[test]
    fn test_explicit_list_not_deduplicated() {
        let expense = Expense::new("2024-01-01", "Food", 30.0, "").with_participants(&["Ann", "Ann", "ann"]);
        let resolved = resolve_with(&expense, &[]);
        assert_eq!(resolved, vec!["Ann", "Ann", "ann"]);
    }

    #[test]
    fn test_fallback_uses_every_name_in_dataset() {
        let expenses = vec![
            Expense::new("2024-01-01", "Food", 10.0, "Alice").with_participants(&["Bob", "Carol"]),
            Expense::new("2024-01-02", "Rent", 20.0, "Dave"),
            Expense::new("2024-01-03", "Fun", 5.0, "Bob").with_participants(&["Eve", "Alice"]),
        ];

        let resolved = resolve_participants(&expenses, &expenses[1]);
        assert_eq!(resolved, vec!["Alice", "Bob", "Carol", "Dave", "Eve"]);
    }

    #[test]
    fn test_fallback_adds_target_payer_outside_set() {
        let expenses = vec![Expense::new("2024-01-01", "Food", 10.0, "Alice")];
        let outsider = Expense::new("2024-01-02", "Food", 10.0, "Zoe");

        assert_eq!(resolve_participants(&expenses, &outsider), vec!["Alice", "Zoe"]);
    }

    #[test]
    fn test_fallback_empty_when_nobody_known() {
        let expense = Expense::new("2024-01-01", "Food", 10.0, "");
        assert!(resolve_participants(&[expense.clone()], &expense).is_empty());
    }

    #[test]
    fn test_distinct_names_exact_match() {
        let expenses = vec![
            Expense::new("", "", 1.0, "alice").with_participants(&["Alice", "alice"]),
        ];
        assert_eq!(distinct_names(&expenses), vec!["alice", "Alice"]);
    }
}
