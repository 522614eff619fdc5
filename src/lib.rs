// Expense Charts - Core Library
// Shared-expense aggregation for the CLI, API server, and tests

pub mod expense;
pub mod participants;
pub mod temporal;
pub mod aggregation;
pub mod fallback;
pub mod store;
pub mod config;

// Re-export commonly used types
pub use expense::{
    Expense, RawExpense, DEFAULT_STATUS,
    normalize_expenses, normalize_expense, normalize_name,
};
pub use participants::{distinct_names, resolve_participants, resolve_with};
pub use temporal::{MonthKey, month_label, parse_expense_date};
pub use aggregation::{
    AggregateSeries, ChartData, MONTH_WINDOW, UNCATEGORIZED,
    build_chart_data, chart_data_from,
    monthly_totals, category_totals, share_totals,
};
pub use fallback::{SeriesKind, or_fallback};
pub use store::{
    setup_database, load_raw_expenses, save_raw_expenses, append_raw_expenses,
    load_json_file, load_csv, verify_count,
};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
