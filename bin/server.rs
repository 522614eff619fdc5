// Expense Charts - Web Server
// Chart data REST API with Axum

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use rusqlite::Connection;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use expense_charts::{
    chart_data_from, load_raw_expenses, normalize_expenses, setup_database, Config, Expense,
    SeriesKind,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    db: Arc<Mutex<Connection>>,
    storage_key: String,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl AppState {
    /// One rendering cycle's read of the persisted collection
    fn load_expenses(&self) -> anyhow::Result<Vec<Expense>> {
        let conn = self
            .db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))?;
        let raw = load_raw_expenses(&conn, &self.storage_key)?;
        Ok(normalize_expenses(&raw))
    }
}

fn parse_series(name: &str) -> Option<SeriesKind> {
    match name.to_lowercase().as_str() {
        "monthly" => Some(SeriesKind::Monthly),
        "category" => Some(SeriesKind::Category),
        "share" => Some(SeriesKind::Share),
        _ => None,
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/expenses - Normalized expenses
async fn get_expenses(State(state): State<AppState>) -> impl IntoResponse {
    match state.load_expenses() {
        Ok(expenses) => (StatusCode::OK, Json(ApiResponse::ok(expenses))).into_response(),
        Err(e) => {
            log::error!("event=api_expenses status=error error={:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Vec<Expense>>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

/// GET /api/charts - All three chart series
async fn get_charts(State(state): State<AppState>) -> impl IntoResponse {
    match state.load_expenses() {
        Ok(expenses) => {
            let data = chart_data_from(&expenses);
            (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
        }
        Err(e) => {
            log::error!("event=api_charts status=error error={:#}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

/// GET /api/charts/:series - One chart series (monthly, category or share)
async fn get_chart_series(
    State(state): State<AppState>,
    Path(series): Path<String>,
) -> impl IntoResponse {
    let Some(kind) = parse_series(&series) else {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::err(format!("unknown series {:?}", series))),
        )
            .into_response();
    };

    match state.load_expenses() {
        Ok(expenses) => {
            let data = chart_data_from(&expenses);
            (StatusCode::OK, Json(ApiResponse::ok(data.series(kind).clone()))).into_response()
        }
        Err(e) => {
            log::error!("event=api_series series={} status=error error={:#}", kind.name(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();

    let conn = Connection::open(&config.db_path)?;
    setup_database(&conn)?;
    log::info!("event=server_db status=ok path={:?}", config.db_path);

    // Create shared state
    let state = AppState {
        db: Arc::new(Mutex::new(conn)),
        storage_key: config.storage_key.clone(),
    };

    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/expenses", get(get_expenses))
        .route("/charts", get(get_charts))
        .route("/charts/:series", get(get_chart_series))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    log::info!("event=server_start status=ok addr={}", config.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
