use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::domain::render::RenderError;

use super::dtos::ErrorResponse;

/// API error type that maps render failures to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Invalid request body (400 Bad Request)
  Validation(String),

  /// Rendering failure (500/503/504 depending on cause)
  Render(RenderError),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::Render(err) => write!(f, "Render error: {}", err),
    }
  }
}

impl From<RenderError> for ApiError {
  fn from(error: RenderError) -> Self {
    ApiError::Render(error)
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Render(err) => match err {
        RenderError::ServiceBusy => StatusCode::SERVICE_UNAVAILABLE,
        RenderError::RenderTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        RenderError::LaunchFailure(_) | RenderError::EngineCrash(_) => {
          StatusCode::INTERNAL_SERVER_ERROR
        }
      },
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::Render(err) => match err {
        RenderError::ServiceBusy => (
          "service_busy",
          "Render service is at capacity, try again later".to_string(),
        ),
        RenderError::RenderTimeout(timeout) => (
          "render_timeout",
          format!("Rendering did not finish within {:?}", timeout),
        ),
        // Engine details stay in the logs; the client gets a generic body.
        RenderError::LaunchFailure(detail) | RenderError::EngineCrash(detail) => {
          tracing::error!("render failure: {}", detail);
          ("render_failed", "Failed to generate PDF".to_string())
        }
      },
    };

    let body = ErrorResponse {
      error: error_type.to_string(),
      message,
      details: None,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(body)
  }
}
