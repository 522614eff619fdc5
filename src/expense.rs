// 🧾 Record Normalizer
// Raw, loosely-typed expense entries → canonical Expense records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status assigned when the raw record carries none
pub const DEFAULT_STATUS: &str = "Unsettled";

// ============================================================================
// RAW INPUT
// ============================================================================

/// RawExpense - untrusted shape read from the persisted collection
///
/// Every field is an arbitrary JSON value so that deserializing any object
/// succeeds. Aliased keys (`desc`/`description`, ...) are kept as separate
/// fields because both may be present at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawExpense {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub desc: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default, rename = "paidBy")]
    pub paid_by: Option<Value>,
    #[serde(default, rename = "addedBy")]
    pub added_by: Option<Value>,
    #[serde(default)]
    pub split: Option<Value>,
    #[serde(default, rename = "addedTo")]
    pub added_to: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,
}

impl RawExpense {
    /// Read one list entry. Non-object entries yield an all-absent record.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => RawExpense::deserialize(value).unwrap_or_default(),
            _ => RawExpense::default(),
        }
    }
}

// ============================================================================
// CANONICAL RECORD
// ============================================================================

/// Expense - normalized record consumed by the aggregators
///
/// `amount` is always finite and >= 0, `participants` never holds empty names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: f64,
    #[serde(rename = "paidBy")]
    pub paid_by: String,
    pub participants: Vec<String>,
    pub status: String,
}

impl Default for Expense {
    fn default() -> Self {
        Expense {
            id: String::new(),
            date: String::new(),
            description: String::new(),
            category: String::new(),
            amount: 0.0,
            paid_by: String::new(),
            participants: Vec::new(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

impl Expense {
    /// Build from typed fields, applying the same name and amount rules as normalization
    pub fn new(date: &str, category: &str, amount: f64, paid_by: &str) -> Self {
        Expense {
            date: date.to_string(),
            category: category.to_string(),
            amount: sanitize_amount(amount),
            paid_by: normalize_name(paid_by),
            ..Expense::default()
        }
    }

    /// Builder pattern: set the explicit split
    pub fn with_participants(mut self, names: &[&str]) -> Self {
        self.participants = names
            .iter()
            .map(|name| normalize_name(name))
            .filter(|name| !name.is_empty())
            .collect();
        self
    }

    pub fn has_amount(&self) -> bool {
        self.amount != 0.0
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Normalize a persisted collection. Anything but a JSON array is an empty set.
pub fn normalize_expenses(raw: &Value) -> Vec<Expense> {
    match raw {
        Value::Array(entries) => entries
            .iter()
            .map(|entry| normalize_expense(&RawExpense::from_value(entry)))
            .collect(),
        other => {
            if !other.is_null() {
                log::debug!("event=normalize status=skipped reason=not_a_list");
            }
            Vec::new()
        }
    }
}

/// Map one raw record to its canonical form, substituting defaults per field.
pub fn normalize_expense(raw: &RawExpense) -> Expense {
    let paid_by = first_present(&raw.paid_by, &raw.added_by)
        .and_then(coerce_string)
        .map(|name| normalize_name(&name))
        .unwrap_or_default();

    let participants = first_present(&raw.split, &raw.added_to)
        .map(split_names)
        .unwrap_or_default();

    let status = raw
        .status
        .as_ref()
        .and_then(|value| value.as_str())
        .filter(|status| !status.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| DEFAULT_STATUS.to_string());

    Expense {
        id: raw.id.as_ref().and_then(coerce_string).unwrap_or_default(),
        date: raw.date.as_ref().and_then(coerce_string).unwrap_or_default(),
        description: first_present(&raw.desc, &raw.description)
            .and_then(coerce_string)
            .unwrap_or_default(),
        category: raw.category.as_ref().and_then(coerce_string).unwrap_or_default(),
        amount: raw.amount.as_ref().map(coerce_amount).unwrap_or(0.0),
        paid_by,
        participants,
        status,
    }
}

/// Trim and collapse internal whitespace runs to a single space
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a comma-joined name list, dropping names that normalize to empty
pub fn split_names(value: &Value) -> Vec<String> {
    let joined = match value {
        Value::Array(items) => items
            .iter()
            .map(|item| coerce_string(item).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(","),
        other => match coerce_string(other) {
            Some(text) => text,
            None => return Vec::new(),
        },
    };

    joined
        .split(',')
        .map(normalize_name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Numeric conversion with every failure mapped to 0
pub fn coerce_amount(value: &Value) -> f64 {
    let amount = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    sanitize_amount(amount)
}

fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Scalars become strings; null, arrays and objects have no string form here
fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Primary key wins unless it is absent or null
fn first_present<'a>(primary: &'a Option<Value>, fallback: &'a Option<Value>) -> Option<&'a Value> {
    match primary {
        Some(value) if !value.is_null() => Some(value),
        _ => fallback.as_ref().filter(|value| !value.is_null()),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_list_input_yields_empty() {
        assert!(normalize_expenses(&json!(null)).is_empty());
        assert!(normalize_expenses(&json!({"id": "1", "amount": 10})).is_empty());
        assert!(normalize_expenses(&json!("expenses")).is_empty());
        assert!(normalize_expenses(&json!(42)).is_empty());
    }

    #[test]
    fn test_full_record_normalized() {
        let raw = json!([{
            "id": "e1",
            "date": "2024-03-05",
            "desc": "Groceries",
            "category": "Food",
            "amount": "42.50",
            "paidBy": "  Alice   Smith ",
            "split": "Alice Smith, Bob ,,  Carol  Jones",
            "status": "Settled"
        }]);

        let expenses = normalize_expenses(&raw);
        assert_eq!(expenses.len(), 1);

        let e = &expenses[0];
        assert_eq!(e.id, "e1");
        assert_eq!(e.description, "Groceries");
        assert_eq!(e.amount, 42.5);
        assert_eq!(e.paid_by, "Alice Smith");
        assert_eq!(e.participants, vec!["Alice Smith", "Bob", "Carol Jones"]);
        assert_eq!(e.status, "Settled");
    }

    #[test]
    fn test_alias_fields_used_as_fallback() {
        let raw = json!([{
            "description": "Taxi",
            "addedBy": "Dan",
            "addedTo": "Dan,Eve"
        }]);

        let e = &normalize_expenses(&raw)[0];
        assert_eq!(e.description, "Taxi");
        assert_eq!(e.paid_by, "Dan");
        assert_eq!(e.participants, vec!["Dan", "Eve"]);
    }

    #[test]
    fn test_primary_field_wins_over_alias() {
        let raw = json!([{
            "desc": "Short",
            "description": "Long",
            "paidBy": "Ann",
            "addedBy": "Ben",
            "split": "Ann",
            "addedTo": "Ben"
        }]);

        let e = &normalize_expenses(&raw)[0];
        assert_eq!(e.description, "Short");
        assert_eq!(e.paid_by, "Ann");
        assert_eq!(e.participants, vec!["Ann"]);
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let expenses = normalize_expenses(&json!([{}, 7, null]));
        assert_eq!(expenses.len(), 3);
        for e in &expenses {
            assert_eq!(e, &Expense::default());
            assert_eq!(e.status, DEFAULT_STATUS);
        }
    }

    #[test]
    fn test_amount_always_finite_and_non_negative() {
        let inputs = vec![
            json!("abc"),
            json!(""),
            json!("   "),
            json!(-12.5),
            json!("-3"),
            json!("NaN"),
            json!("inf"),
            json!(null),
            json!([1, 2]),
            json!({"v": 1}),
            json!(false),
            json!(1e308),
        ];

        for input in inputs {
            let amount = coerce_amount(&input);
            assert!(amount.is_finite(), "{:?} → {}", input, amount);
            assert!(amount >= 0.0, "{:?} → {}", input, amount);
        }

        assert_eq!(coerce_amount(&json!(" 19.99 ")), 19.99);
        assert_eq!(coerce_amount(&json!(true)), 1.0);
        assert_eq!(coerce_amount(&json!("abc")), 0.0);
    }

    #[test]
    fn test_wrongly_typed_fields() {
        let raw = json!([{
            "id": 17,
            "category": ["Food"],
            "paidBy": {"name": "Zed"},
            "status": 3
        }]);

        let e = &normalize_expenses(&raw)[0];
        assert_eq!(e.id, "17");
        assert_eq!(e.category, "");
        assert_eq!(e.paid_by, "");
        assert_eq!(e.status, DEFAULT_STATUS);
    }

    #[test]
    fn test_split_as_array_is_joined() {
        let names = split_names(&json!(["Ann", " Bob , Cy", ""]));
        assert_eq!(names, vec!["Ann", "Bob", "Cy"]);
    }

    #[test]
    fn test_blank_split_is_empty() {
        assert!(split_names(&json!(" , ,")).is_empty());
        assert!(split_names(&json!({"a": 1})).is_empty());
    }

    #[test]
    fn test_input_order_preserved() {
        let raw = json!([{"id": "b"}, {"id": "a"}, {"id": "c"}]);
        let ids: Vec<String> = normalize_expenses(&raw).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_normalize_name_collapses_whitespace() {
        assert_eq!(normalize_name("  Mary \t Ann  "), "Mary Ann");
        assert_eq!(normalize_name("   "), "");
    }
}
