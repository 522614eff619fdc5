use expense_charts::{
    build_chart_data, load_raw_expenses, normalize_expenses, resolve_participants,
    save_raw_expenses, setup_database, SeriesKind,
};
use rusqlite::Connection;
use serde_json::{json, Value};

fn household() -> Value {
    json!([
        {"id": "1", "date": "2024-01-04", "desc": "Groceries", "category": "Food",
         "amount": 100, "paidBy": "Alice", "split": "Alice, Bob"},
        {"id": "2", "date": "2024-01-18", "description": "Internet", "category": "Utilities",
         "amount": "50", "addedBy": "Bob"},
        {"id": "3", "date": "2024-02-02", "desc": "Dinner", "category": "Food",
         "amount": 30, "paidBy": "Carol", "addedTo": "Alice,Bob"},
        {"id": "4", "date": "someday", "desc": "Gift", "category": "Gifts",
         "amount": 12, "paidBy": "Dan", "split": "Dan"},
        {"id": "5", "date": "2024-02-10", "desc": "Refund", "category": "Food",
         "amount": "n/a", "paidBy": "Alice"}
    ])
}

#[test]
fn test_household_pipeline() {
    let data = build_chart_data(&household());

    assert_eq!(data.monthly.labels, vec!["Jan", "Feb"]);
    assert_eq!(data.monthly.values, vec![150.0, 30.0]);

    // Only February counts; the zero-amount refund adds nothing
    assert_eq!(data.category.labels, vec!["Food"]);
    assert_eq!(data.category.values, vec![30.0]);

    // 1: Alice/Bob 50 each. 2: everyone (Alice, Bob, Carol, Dan) 12.5 each.
    // 3: Alice/Bob/Carol 10 each. 4: Dan 12. 5: zero amount.
    assert_eq!(data.share.labels, vec!["Alice", "Bob", "Carol", "Dan"]);
    assert_eq!(data.share.values, vec![72.5, 72.5, 22.5, 24.5]);
}

#[test]
fn test_unsplit_expense_resolves_to_everyone() {
    let expenses = normalize_expenses(&household());
    let resolved = resolve_participants(&expenses, &expenses[1]);
    assert_eq!(resolved, vec!["Alice", "Bob", "Carol", "Dan"]);
}

#[test]
fn test_pipeline_is_idempotent() {
    let raw = household();
    assert_eq!(build_chart_data(&raw), build_chart_data(&raw));
}

#[test]
fn test_non_list_source_renders_fixtures() {
    for raw in [json!(null), json!({"expenses": []}), json!("[]"), json!([])] {
        let data = build_chart_data(&raw);
        assert_eq!(data.monthly, SeriesKind::Monthly.fixture());
        assert_eq!(data.category, SeriesKind::Category.fixture());
        assert_eq!(data.share, SeriesKind::Share.fixture());
    }
}

#[test]
fn test_store_round_trip_feeds_pipeline() {
    let conn = Connection::open_in_memory().unwrap();
    setup_database(&conn).unwrap();
    save_raw_expenses(&conn, "expenses", &household()).unwrap();

    let raw = load_raw_expenses(&conn, "expenses").unwrap();
    assert_eq!(build_chart_data(&raw), build_chart_data(&household()));
}
