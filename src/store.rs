// 🗄️ Expense store - SQLite key/value persistence
// Holds the raw expense collection as one JSON document per storage key.
//
// Reads are fail-soft: a missing key, corrupt JSON or a non-list document is
// an empty collection. Only SQL and file-system failures surface as errors.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::{Map, Value};
use std::path::Path;

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )
    .context("Failed to create kv_store table")?;

    Ok(())
}

/// Read the collection stored under `key`, always as a JSON array
pub fn load_raw_expenses(conn: &Connection, key: &str) -> Result<Value> {
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .with_context(|| format!("Failed to read storage key {:?}", key))?;

    match stored {
        Some(text) => Ok(parse_collection(&text, key)),
        None => {
            log::info!("event=store_load key={} status=empty reason=absent", key);
            Ok(empty_collection())
        }
    }
}

/// Replace the collection stored under `key`
pub fn save_raw_expenses(conn: &Connection, key: &str, expenses: &Value) -> Result<()> {
    let text = serde_json::to_string(expenses).context("Failed to encode expenses")?;

    conn.execute(
        "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        params![key, text],
    )
    .with_context(|| format!("Failed to write storage key {:?}", key))?;

    Ok(())
}

/// Append entries to the stored list, returning the new length
pub fn append_raw_expenses(conn: &Connection, key: &str, entries: Vec<Value>) -> Result<usize> {
    let mut collection = match load_raw_expenses(conn, key)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    let added = entries.len();
    collection.extend(entries);
    let total = collection.len();

    save_raw_expenses(conn, key, &Value::Array(collection))?;
    log::info!("event=store_append key={} added={} total={}", key, added, total);

    Ok(total)
}

/// Number of raw entries stored under `key`
pub fn verify_count(conn: &Connection, key: &str) -> Result<usize> {
    Ok(load_raw_expenses(conn, key)?
        .as_array()
        .map(Vec::len)
        .unwrap_or(0))
}

/// Read a JSON export from disk. Unreadable files are errors, bad content is not.
pub fn load_json_file(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read expense file: {:?}", path))?;
    Ok(parse_collection(&text, &path.display().to_string()))
}

/// Load CSV rows as raw expense objects keyed by header
///
/// Empty cells are left out so the normalizer applies its defaults and alias
/// fallbacks. Rows without an `id` get a fresh UUID.
pub fn load_csv(csv_path: &Path) -> Result<Vec<Value>> {
    let mut rdr = csv::Reader::from_path(csv_path).context("Failed to open CSV file")?;
    let headers = rdr.headers().context("Failed to read CSV headers")?.clone();

    let mut entries = Vec::new();

    for result in rdr.records() {
        let record = result.context("Failed to read CSV record")?;

        let mut entry = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            let header = header.trim();
            if header.is_empty() || cell.trim().is_empty() {
                continue;
            }
            entry.insert(header.to_string(), Value::String(cell.to_string()));
        }

        if !entry.contains_key("id") {
            entry.insert("id".to_string(), Value::String(uuid::Uuid::new_v4().to_string()));
        }

        entries.push(Value::Object(entry));
    }

    Ok(entries)
}

fn parse_collection(text: &str, source: &str) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Array(_)) => value,
        Ok(_) => {
            log::warn!("event=store_load source={} status=empty reason=not_a_list", source);
            empty_collection()
        }
        Err(e) => {
            log::warn!("event=store_load source={} status=empty reason=corrupt error={}", source, e);
            empty_collection()
        }
    }
}

fn empty_collection() -> Value {
    Value::Array(Vec::new())
}

// ============================================================================
// TESTS
// ============================================================================
