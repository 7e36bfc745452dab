use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpResponse, http::StatusCode, web};
use std::sync::Arc;

use crate::domain::render::{PdfEngine, ResponseContract};

use super::dtos::ErrorResponse;
use super::handlers::{health_handler, render_handler};

/// Configure render service routes
///
/// # Routes
///
/// - POST /render - Convert markup to a PDF
/// - GET /health - Liveness probe
pub fn configure_render_routes(
  cfg: &mut web::ServiceConfig,
  engine: Arc<dyn PdfEngine>,
  contract: ResponseContract,
  max_body_bytes: usize,
) {
  cfg
    .app_data(web::Data::new(engine))
    .app_data(web::Data::new(contract))
    .app_data(json_config(max_body_bytes))
    .route("/render", web::post().to(render_handler))
    .route("/health", web::get().to(health_handler));
}

/// JSON extractor config: enforce the payload bound and answer oversized
/// bodies with 413 instead of the default 400.
fn json_config(max_body_bytes: usize) -> web::JsonConfig {
  web::JsonConfig::default()
    .limit(max_body_bytes)
    .error_handler(|err, _req| {
      let status = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
          StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
      };
      let body = ErrorResponse {
        error: if status == StatusCode::PAYLOAD_TOO_LARGE {
          "payload_too_large".to_string()
        } else {
          "invalid_body".to_string()
        },
        message: err.to_string(),
        details: None,
      };
      InternalError::from_response(err, HttpResponse::build(status).json(body)).into()
    })
}
