use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Output of one render invocation, tagged with its encoding so the decoder
/// can branch correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
  /// Raw PDF bytes.
  Binary(Vec<u8>),
  /// Base64-encoded PDF (standard alphabet).
  Base64(String),
}

/// Which wire shape the render service speaks.
///
/// Exactly one contract is in force at a time; the server emits it and the
/// bridge refuses responses that do not match it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseContract {
  /// `Content-Type: application/pdf` with raw bytes.
  RawPdf,
  /// `Content-Type: application/json` with `{ "data": <base64> }`.
  Base64Json,
}

impl ResponseContract {
  pub fn as_str(&self) -> &'static str {
    match self {
      ResponseContract::RawPdf => "raw-pdf",
      ResponseContract::Base64Json => "base64-json",
    }
  }
}

impl fmt::Display for ResponseContract {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for ResponseContract {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "raw-pdf" => Ok(ResponseContract::RawPdf),
      "base64-json" => Ok(ResponseContract::Base64Json),
      other => Err(format!("unknown response contract: {}", other)),
    }
  }
}
