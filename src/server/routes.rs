use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::analyzer::dashboard::{render_dashboard, DashboardData};
use crate::error::AppError;
use crate::AppState;

fn default_period() -> String {
    "week".to_string()
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default = "default_period")]
    pub period: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET / — one synchronous pipeline run over a fresh copy of the export.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardData>, AppError> {
    let today = Local::now().date_naive();
    let data = render_dashboard(
        &state.config,
        state.summarizer.as_ref(),
        &query.period,
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        today,
    )
    .await?;
    Ok(Json(data))
}

/// GET /health — liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
