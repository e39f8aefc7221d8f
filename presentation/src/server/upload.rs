//! `POST /upload` handler.
//!
//! Every failure is reported as `{"error": "..."}` with HTTP 200, so clients
//! only ever need to look at the body.

use super::AppState;
use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use snapquiz_application::{SolveScreenshotError, SolvedScreenshot};
use thiserror::Error;
use tracing::{info, warn};

/// Errors reported by the upload endpoint
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("No image provided")]
    NoImage,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid base64 image data: {0}")]
    InvalidImage(String),

    #[error(transparent)]
    Solve(#[from] SolveScreenshotError),
}

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Decode a base64 image, with or without a `data:<mime>;base64,` prefix.
///
/// ASCII whitespace inside the payload is ignored.
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, UploadError> {
    let payload = payload.trim();
    let data = match payload.strip_prefix("data:") {
        Some(rest) => match rest.split_once(',') {
            Some((meta, data)) if meta.ends_with(";base64") => data,
            _ => {
                return Err(UploadError::InvalidImage(
                    "data URI is not base64-encoded".to_string(),
                ));
            }
        },
        None => payload,
    };

    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(UploadError::NoImage);
    }

    STANDARD
        .decode(compact)
        .map_err(|e| UploadError::InvalidImage(e.to_string()))
}

pub async fn upload(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match solve_upload(&state, body).await {
        Ok(solved) => {
            info!(choice = %solved.answer.choice, "Upload solved");
            Json(solved).into_response()
        }
        Err(e) => {
            warn!("Upload failed: {}", e);
            Json(ErrorBody {
                error: e.to_string(),
            })
            .into_response()
        }
    }
}

async fn solve_upload(
    state: &AppState,
    body: Result<Bytes, BytesRejection>,
) -> Result<SolvedScreenshot, UploadError> {
    let body = body.map_err(|e| UploadError::InvalidBody(e.body_text()))?;
    let request: UploadRequest =
        serde_json::from_slice(&body).map_err(|e| UploadError::InvalidBody(e.to_string()))?;

    let payload = request
        .image
        .filter(|image| !image.trim().is_empty())
        .ok_or(UploadError::NoImage)?;
    let image = decode_image_payload(&payload)?;

    Ok(state.solver.execute(&image, &state.params).await?)
}
