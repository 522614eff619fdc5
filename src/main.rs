use anyhow::{bail, Result};
use rusqlite::Connection;
use std::env;
use std::path::Path;

use expense_charts::{
    append_raw_expenses, build_chart_data, load_csv, load_json_file, load_raw_expenses,
    setup_database, AggregateSeries, ChartData, Config,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let config = Config::from_env();

    match args.get(1).map(String::as_str) {
        Some("import") => match args.get(2) {
            Some(csv_path) => run_import(&config, Path::new(csv_path))?,
            None => bail!("usage: expense-charts import <file.csv>"),
        },
        Some("json") => {
            let data = load_chart_data(&config, args.get(2).map(Path::new))?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Some("show") | None => {
            let data = load_chart_data(&config, args.get(2).map(Path::new))?;
            print_chart_data(&data);
        }
        Some(other) => bail!("unknown command {:?} (expected import, show or json)", other),
    }

    Ok(())
}

fn run_import(config: &Config, csv_path: &Path) -> Result<()> {
    println!("📂 Loading CSV...");
    let rows = load_csv(csv_path)?;
    println!("✓ Loaded {} expenses from {:?}", rows.len(), csv_path);

    let conn = Connection::open(&config.db_path)?;
    setup_database(&conn)?;

    let total = append_raw_expenses(&conn, &config.storage_key, rows)?;
    println!("✓ Store {:?} now holds {} expenses", config.db_path, total);

    Ok(())
}

/// One rendering cycle's read: a JSON export when given, the store otherwise
fn load_chart_data(config: &Config, json_path: Option<&Path>) -> Result<ChartData> {
    let raw = match json_path {
        Some(path) => load_json_file(path)?,
        None => {
            let conn = Connection::open(&config.db_path)?;
            setup_database(&conn)?;
            load_raw_expenses(&conn, &config.storage_key)?
        }
    };

    Ok(build_chart_data(&raw))
}

fn print_chart_data(data: &ChartData) {
    print_series("Monthly spend", &data.monthly);
    print_series("Spend by category", &data.category);
    print_series("Cost share", &data.share);
}

fn print_series(title: &str, series: &AggregateSeries) {
    let suffix = if series.fallback { " (demo data)" } else { "" };
    println!("\n== {}{} ==", title, suffix);
    for (label, value) in series.pairs() {
        println!("  {:<16} {:>10.2}", label, value);
    }
}
