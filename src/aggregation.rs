// 📊 Aggregator - monthly, category and share views
// Three independent single-pass reducers over normalized expenses.
//
// Each reducer skips records it cannot use and ends in one guarded fixture
// substitution, so a view is never empty.

use crate::expense::{normalize_expenses, Expense};
use crate::fallback::{or_fallback, SeriesKind};
use crate::participants::{distinct_names, resolve_with};
use crate::temporal::MonthKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Number of most recent months kept in the monthly view
pub const MONTH_WINDOW: usize = 9;

/// Label used for expenses with an empty category
pub const UNCATEGORIZED: &str = "Uncategorized";

// ============================================================================
// OUTPUT TYPES
// ============================================================================

/// AggregateSeries - ordered (label, value) pairs as parallel arrays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSeries {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    /// True when fixture data was substituted for an empty result
    #[serde(default)]
    pub fallback: bool,
}

impl AggregateSeries {
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (labels, values) = pairs
            .into_iter()
            .map(|(label, value)| (label.into(), value))
            .unzip();
        AggregateSeries {
            labels,
            values,
            fallback: false,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn value_of(&self, label: &str) -> Option<f64> {
        self.pairs().find(|(l, _)| *l == label).map(|(_, v)| v)
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// ChartData - the three views handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub monthly: AggregateSeries,
    pub category: AggregateSeries,
    pub share: AggregateSeries,
}

impl ChartData {
    pub fn series(&self, kind: SeriesKind) -> &AggregateSeries {
        match kind {
            SeriesKind::Monthly => &self.monthly,
            SeriesKind::Category => &self.category,
            SeriesKind::Share => &self.share,
        }
    }
}

// ============================================================================
// INSERTION-ORDERED TALLY
// ============================================================================

/// Running totals keyed by exact string, reported in first-encounter order
#[derive(Debug, Default)]
struct Tally {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, key: &str, amount: f64) {
        match self.index.get(key) {
            Some(&i) => {
                let total = &mut self.entries[i].1;
                *total = saturating_add(*total, amount);
            }
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), amount));
            }
        }
    }

    fn into_series(self) -> AggregateSeries {
        AggregateSeries::from_pairs(
            self.entries
                .into_iter()
                .map(|(key, total)| (key, round_cents(total))),
        )
    }
}

/// Totals stay finite: sums past `f64::MAX` pin to `f64::MAX`
fn saturating_add(total: f64, amount: f64) -> f64 {
    (total + amount).min(f64::MAX)
}

fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

// ============================================================================
// MONTHLY TOTALS
// ============================================================================

/// Sum of non-zero, validly dated amounts per calendar month, ascending
pub fn monthly_buckets(expenses: &[Expense]) -> BTreeMap<MonthKey, f64> {
    let mut buckets = BTreeMap::new();
    for expense in expenses.iter().filter(|e| e.has_amount()) {
        if let Some(key) = MonthKey::parse(&expense.date) {
            let total = buckets.entry(key).or_insert(0.0);
            *total = saturating_add(*total, expense.amount);
        }
    }
    buckets
}

/// Most recent month holding a non-zero, validly dated expense
pub fn latest_month(expenses: &[Expense]) -> Option<MonthKey> {
    monthly_buckets(expenses).keys().next_back().copied()
}

pub fn monthly_totals(expenses: &[Expense]) -> AggregateSeries {
    let buckets = monthly_buckets(expenses);
    let skip = buckets.len().saturating_sub(MONTH_WINDOW);

    let series = AggregateSeries::from_pairs(
        buckets
            .into_iter()
            .skip(skip)
            .map(|(key, total)| (key.label(), round_cents(total))),
    );

    or_fallback(series, SeriesKind::Monthly)
}

// ============================================================================
// CATEGORY TOTALS
// ============================================================================

/// Per-category totals for the latest month, or for all time when no
/// expense carries a usable date
pub fn category_totals(expenses: &[Expense]) -> AggregateSeries {
    let latest = latest_month(expenses);
    let mut tally = Tally::default();

    for expense in expenses.iter().filter(|e| e.has_amount()) {
        if let Some(month) = latest {
            if MonthKey::parse(&expense.date) != Some(month) {
                continue;
            }
        }
        tally.add(category_label(expense), expense.amount);
    }

    or_fallback(tally.into_series(), SeriesKind::Category)
}

fn category_label(expense: &Expense) -> &str {
    if expense.category.is_empty() {
        UNCATEGORIZED
    } else {
        &expense.category
    }
}

// ============================================================================
// SHARE TOTALS
// ============================================================================

/// Equal-split cost share per person, keyed by exact resolved name
pub fn share_totals(expenses: &[Expense]) -> AggregateSeries {
    let everyone = distinct_names(expenses);
    let mut tally = Tally::default();

    for expense in expenses.iter().filter(|e| e.has_amount()) {
        let sharers = resolve_with(expense, &everyone);
        if sharers.is_empty() {
            continue;
        }
        let share = expense.amount / sharers.len() as f64;
        for name in &sharers {
            tally.add(name, share);
        }
    }

    or_fallback(tally.into_series(), SeriesKind::Share)
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run all three reducers over already-normalized expenses
pub fn chart_data_from(expenses: &[Expense]) -> ChartData {
    let data = ChartData {
        monthly: monthly_totals(expenses),
        category: category_totals(expenses),
        share: share_totals(expenses),
    };

    log::debug!(
        "event=aggregate status=ok expenses={} monthly={} category={} share={}",
        expenses.len(),
        data.monthly.len(),
        data.category.len(),
        data.share.len()
    );

    data
}

/// Full rendering cycle: raw persisted collection → three chart series
pub fn build_chart_data(raw: &Value) -> ChartData {
    chart_data_from(&normalize_expenses(raw))
}

// ============================================================================
// TESTS
// ============================================================================
