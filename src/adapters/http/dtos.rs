use serde::{Deserialize, Serialize};

/// Body of POST /render.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
  pub html: String,
}

/// Successful response under the base64-json contract.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
  /// Base64-encoded PDF bytes.
  pub data: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
  pub status: &'static str,
}

/// Error response body shared by all failure modes.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub error: String,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub details: Option<String>,
}
