use actix_web::{HttpResponse, web};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::sync::Arc;

use crate::domain::render::{PdfEngine, RenderableDocument, ResponseContract};

use super::dtos::{HealthResponse, RenderRequest, RenderResponse};
use super::errors::ApiError;

/// Handler for PDF rendering
///
/// POST /render
/// Body: RenderRequest (JSON)
/// Response: raw PDF bytes or a base64 envelope, per the active contract
pub async fn render_handler(
  request: web::Json<RenderRequest>,
  engine: web::Data<Arc<dyn PdfEngine>>,
  contract: web::Data<ResponseContract>,
) -> Result<HttpResponse, ApiError> {
  let html = request.into_inner().html;
  if html.trim().is_empty() {
    return Err(ApiError::Validation("html must not be empty".to_string()));
  }

  let document = RenderableDocument::new(html);
  tracing::info!(bytes = document.len(), "render request accepted");

  let pdf = engine.render(&document).await?;

  Ok(match *contract.get_ref() {
    ResponseContract::RawPdf => HttpResponse::Ok()
      .content_type("application/pdf")
      .body(pdf),
    ResponseContract::Base64Json => HttpResponse::Ok().json(RenderResponse {
      data: STANDARD.encode(pdf),
    }),
  })
}

/// Liveness probe
pub async fn health_handler() -> HttpResponse {
  HttpResponse::Ok().json(HealthResponse { status: "ok" })
}
