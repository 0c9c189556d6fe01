//! API handlers for the intake server

use std::time::Duration;

use axum::{body::Bytes, extract::State, Json};
use intake_core::{ArchiveName, RocDate};
use intake_types::CanonicalRecord;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::AppState;

pub const SAVED_MESSAGE: &str = "儲存成功";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health and GET /
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "intake-server",
        message: "富足診所電子病歷系統",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    pub success: bool,
    pub message: &'static str,
    /// Archive stem shared by the `.json` and `.pdf` files
    pub file_name: String,
}

/// Handler: POST /api/intake and POST /
///
/// The body is read as raw bytes so a form posted without a JSON content
/// type is still accepted.
pub async fn handle_intake(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<IntakeResponse>, ApiError> {
    let received: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidRequest(format!("body is not JSON: {e}")))?;
    let record: CanonicalRecord = serde_json::from_value(received.clone())
        .map_err(|e| ApiError::InvalidRequest(format!("not an intake record: {e}")))?;

    let today = RocDate::today()?;
    let name = ArchiveName::for_record(&record, today);
    info!(stem = name.stem(), "Intake submission received");

    let rendered = tokio::time::timeout(
        Duration::from_millis(state.timeout_ms),
        state.renderer.render(&record, &today.compact()),
    )
    .await
    .map_err(|_| ApiError::Timeout(state.timeout_ms))??;
    debug!(
        pages = rendered.page_count,
        warnings = rendered.warnings.len(),
        "PDF ready"
    );

    let stored = state.archive.store(&name, &received, &rendered.pdf).await?;
    info!(pdf = %stored.pdf.display(), "Intake form archived");

    Ok(Json(IntakeResponse {
        success: true,
        message: SAVED_MESSAGE,
        file_name: name.stem().to_string(),
    }))
}
