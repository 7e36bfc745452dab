use std::time::Duration;
use thiserror::Error;

/// Failures reaching or talking to the render service. Reported to the user
/// with a retry option; never retried automatically.
#[derive(Debug, Error)]
pub enum TransportError {
  /// Connection refused or request timed out. A timed-out request does not
  /// stop any render already running server-side; cancellation is
  /// best-effort only.
  #[error("render service unreachable: {0}")]
  Unreachable(String),

  #[error("render service rejected the request (status {status}): {body}")]
  ServerRejected { status: u16, body: String },

  #[error("render service response did not match the {expected} contract: {detail}")]
  MalformedResponse {
    expected: &'static str,
    detail: String,
  },
}

/// Failures inside the rendering engine. Surfaced to the submitting client as
/// a single error; no partial output is ever returned, and the service stays
/// able to accept the next request.
#[derive(Debug, Error)]
pub enum RenderError {
  #[error("failed to launch rendering engine: {0}")]
  LaunchFailure(String),

  #[error("render did not finish within {0:?}")]
  RenderTimeout(Duration),

  #[error("rendering engine crashed: {0}")]
  EngineCrash(String),

  #[error("render service is at capacity, try again later")]
  ServiceBusy,
}

/// Failure decoding a render result into PDF bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
  #[error("corrupt PDF encoding: {0}")]
  CorruptEncoding(String),
}
