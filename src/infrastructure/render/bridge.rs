use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::render::{
  RenderBridge, RenderResult, RenderableDocument, ResponseContract, TransportError,
};

#[derive(Serialize)]
struct RenderRequestBody<'a> {
  html: &'a str,
}

#[derive(Deserialize)]
struct PdfEnvelope {
  data: String,
}

/// reqwest-backed transport to the render service.
///
/// Parameterized by the active response contract; a response of the wrong
/// shape is rejected as malformed rather than silently accepted.
pub struct HttpRenderBridge {
  client: reqwest::Client,
  endpoint: String,
  contract: ResponseContract,
  request_timeout: Duration,
}

impl HttpRenderBridge {
  pub fn new(
    endpoint: String,
    request_timeout: Duration,
    contract: ResponseContract,
  ) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(request_timeout).build()?;
    Ok(Self {
      client,
      endpoint,
      contract,
      request_timeout,
    })
  }
}

#[async_trait]
impl RenderBridge for HttpRenderBridge {
  async fn submit(&self, document: &RenderableDocument) -> Result<RenderResult, TransportError> {
    tracing::debug!(endpoint = %self.endpoint, bytes = document.len(), "submitting render request");

    let response = self
      .client
      .post(&self.endpoint)
      .json(&RenderRequestBody {
        html: document.as_str(),
      })
      .send()
      .await
      .map_err(|e| {
        if e.is_timeout() {
          // Aborting the wait does not stop the server-side render;
          // cancellation is best-effort only.
          TransportError::Unreachable(format!(
            "no response within {:?}; the render may still be running on the server",
            self.request_timeout
          ))
        } else {
          TransportError::Unreachable(e.to_string())
        }
      })?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      tracing::warn!(status = status.as_u16(), "render service rejected request");
      return Err(TransportError::ServerRejected {
        status: status.as_u16(),
        body,
      });
    }

    let content_type = response
      .headers()
      .get(reqwest::header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(|s| s.to_string());
    let body = response
      .bytes()
      .await
      .map_err(|e| TransportError::Unreachable(e.to_string()))?;

    match self.contract {
      ResponseContract::Base64Json => parse_envelope(&body),
      ResponseContract::RawPdf => parse_raw_pdf(content_type.as_deref(), body.to_vec()),
    }
  }
}

/// Parse the `{ "data": <base64> }` envelope of the base64-json contract.
fn parse_envelope(body: &[u8]) -> Result<RenderResult, TransportError> {
  let envelope: PdfEnvelope =
    serde_json::from_slice(body).map_err(|e| TransportError::MalformedResponse {
      expected: "base64-json",
      detail: e.to_string(),
    })?;

  if envelope.data.trim().is_empty() {
    return Err(TransportError::MalformedResponse {
      expected: "base64-json",
      detail: "envelope carries no data".to_string(),
    });
  }

  Ok(RenderResult::Base64(envelope.data))
}

/// Accept raw bytes only when the service declares them as a PDF.
fn parse_raw_pdf(content_type: Option<&str>, body: Vec<u8>) -> Result<RenderResult, TransportError> {
  match content_type {
    Some(ct) if ct.starts_with("application/pdf") => {
      if body.is_empty() {
        return Err(TransportError::MalformedResponse {
          expected: "raw-pdf",
          detail: "response body is empty".to_string(),
        });
      }
      Ok(RenderResult::Binary(body))
    }
    other => Err(TransportError::MalformedResponse {
      expected: "raw-pdf",
      detail: format!("unexpected content type: {}", other.unwrap_or("<none>")),
    }),
  }
}
