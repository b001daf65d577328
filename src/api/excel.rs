use std::io::ErrorKind;
use std::path::Path;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::AppState;
use crate::config::attachment_name;
use crate::error::{AppError, Result};

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub async fn excel_handler(State(state): State<AppState>) -> Result<Response> {
    let path = state.config.excel_path.as_path();
    let file_name = attachment_name(path).map_err(|e| AppError::ArtifactUnavailable(e.to_string()))?;
    let bytes = read_artifact(path).await?;

    tracing::info!(path = %path.display(), size = bytes.len(), "serving excel file");

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename={}", file_name)),
        ],
        bytes,
    )
        .into_response())
}

async fn read_artifact(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::ArtifactNotFound(path.display().to_string()),
        _ => AppError::ArtifactUnavailable(format!("{}: {}", path.display(), e)),
    })
}
