//! HTTP server exposing the screenshot solver.
//!
//! - `GET /` health check
//! - `POST /upload` body `{"image": "<base64>"}`, answers
//!   `{"question_text", "answer"}` or `{"error"}`

mod upload;

pub use upload::{UploadError, UploadRequest, decode_image_payload, upload};

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use serde_json::{Value, json};
use snapquiz_application::{SolveParams, SolveScreenshotUseCase};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, instrument};

/// Request bodies above this size are rejected (base64 inflates images by 4/3).
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application state shared across routes.
#[derive(Clone)]
pub struct AppState {
    pub solver: Arc<SolveScreenshotUseCase>,
    pub params: Arc<SolveParams>,
}

impl AppState {
    pub fn new(solver: SolveScreenshotUseCase, params: SolveParams) -> Self {
        Self {
            solver: Arc::new(solver),
            params: Arc::new(params),
        }
    }
}

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/upload", post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "message": "Backend running"}))
}

/// Serve until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
