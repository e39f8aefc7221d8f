//! OCR client for the Gradio HTTP API.
//!
//! One recognition is three requests:
//!
//! 1. `POST /gradio_api/upload` (multipart `files`) stores the image
//! 2. `POST /gradio_api/call/{api_name}` queues a prediction and returns an `event_id`
//! 3. `GET /gradio_api/call/{api_name}/{event_id}` streams events until `complete`

use super::sse::{CallOutcome, terminal_event};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use snapquiz_application::ports::ocr_service::{OcrError, OcrService};
use snapquiz_domain::core::string::truncate;
use std::time::Duration;
use tracing::{debug, info};

const ERROR_BODY_PREVIEW: usize = 300;

#[derive(Debug, Deserialize)]
struct CallAccepted {
    event_id: String,
}

/// [`OcrService`] implementation talking to a Gradio app.
#[derive(Debug, Clone)]
pub struct GradioOcrClient {
    client: reqwest::Client,
    base_url: String,
    api_name: String,
    token: Option<String>,
    timeout: Duration,
}

impl GradioOcrClient {
    pub fn new(
        base_url: impl Into<String>,
        api_name: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, OcrError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("snapquiz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OcrError::RequestFailed(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_name: api_name.into().trim_start_matches('/').to_string(),
            token,
            timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/gradio_api/{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn upload(&self, image: &[u8]) -> Result<String, OcrError> {
        let (file_name, mime) = sniff_image_type(image);
        let part = Part::bytes(image.to_vec())
            .file_name(file_name)
            .mime_str(mime)
            .map_err(map_reqwest_error)?;

        let response = self
            .authorized(self.client.post(self.url("upload")))
            .multipart(Form::new().part("files", part))
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let paths: Vec<String> = checked(response).await?.json().await.map_err(map_reqwest_error)?;
        paths
            .into_iter()
            .next()
            .ok_or_else(|| OcrError::InvalidResponse("upload returned no file paths".to_string()))
    }

    async fn call(&self, uploaded_path: &str) -> Result<String, OcrError> {
        let body = serde_json::json!({
            "data": [{
                "path": uploaded_path,
                "meta": { "_type": "gradio.FileData" }
            }]
        });

        let response = self
            .authorized(self.client.post(self.url(&format!("call/{}", self.api_name))))
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let accepted: CallAccepted = checked(response).await?.json().await.map_err(map_reqwest_error)?;
        Ok(accepted.event_id)
    }

    async fn result(&self, event_id: &str) -> Result<Value, OcrError> {
        let response = self
            .authorized(
                self.client
                    .get(self.url(&format!("call/{}/{}", self.api_name, event_id))),
            )
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let body = checked(response).await?.text().await.map_err(map_reqwest_error)?;

        match terminal_event(&body) {
            Some(CallOutcome::Complete(data)) => first_output(&data),
            Some(CallOutcome::Error(data)) => Err(OcrError::PredictionFailed(data)),
            None => Err(OcrError::InvalidResponse(
                "event stream ended without a result".to_string(),
            )),
        }
    }

    async fn recognize_inner(&self, image: &[u8]) -> Result<Value, OcrError> {
        let path = self.upload(image).await?;
        debug!(path = %path, "Uploaded image to OCR app");

        let event_id = self.call(&path).await?;
        debug!(event_id = %event_id, "OCR prediction queued");

        self.result(&event_id).await
    }
}

#[async_trait]
impl OcrService for GradioOcrClient {
    async fn recognize(&self, image: &[u8]) -> Result<Value, OcrError> {
        info!(api = %self.api_name, bytes = image.len(), "Calling OCR app");
        tokio::time::timeout(self.timeout, self.recognize_inner(image))
            .await
            .map_err(|_| OcrError::Timeout)?
    }
}

/// Fail on non-2xx responses, keeping a preview of the body.
async fn checked(response: reqwest::Response) -> Result<reqwest::Response, OcrError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(OcrError::RequestFailed(format!(
        "HTTP {}: {}",
        status,
        truncate(body.trim(), ERROR_BODY_PREVIEW)
    )))
}

/// The recognition result is the first element of the output array.
fn first_output(data: &str) -> Result<Value, OcrError> {
    let outputs: Value = serde_json::from_str(data)
        .map_err(|e| OcrError::InvalidResponse(format!("complete event is not JSON: {}", e)))?;

    match outputs {
        Value::Array(mut items) if !items.is_empty() => Ok(items.swap_remove(0)),
        other => Err(OcrError::InvalidResponse(format!(
            "expected a non-empty output array, got {}",
            truncate(&other.to_string(), ERROR_BODY_PREVIEW)
        ))),
    }
}

/// File name and MIME type from the image's magic bytes.
fn sniff_image_type(image: &[u8]) -> (&'static str, &'static str) {
    match image {
        [0x89, b'P', b'N', b'G', ..] => ("image.png", "image/png"),
        [0xFF, 0xD8, 0xFF, ..] => ("image.jpg", "image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => ("image.gif", "image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => {
            ("image.webp", "image/webp")
        }
        _ => ("image.bin", "application/octet-stream"),
    }
}

fn map_reqwest_error(e: reqwest::Error) -> OcrError {
    if e.is_timeout() {
        OcrError::Timeout
    } else if e.is_connect() {
        OcrError::ConnectionError(e.to_string())
    } else if e.is_decode() {
        OcrError::InvalidResponse(e.to_string())
    } else {
        OcrError::RequestFailed(e.to_string())
    }
}
