use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::errors::DecodeError;
use super::result::RenderResult;

/// Turn a render result into the exact PDF bytes the engine produced.
///
/// Binary results pass through untouched; base64 results are decoded. No
/// re-encoding happens here, so the downloadable artifact is byte-identical
/// to the engine output.
pub fn decode_result(result: RenderResult) -> Result<Vec<u8>, DecodeError> {
  match result {
    RenderResult::Binary(bytes) => {
      if bytes.is_empty() {
        return Err(DecodeError::CorruptEncoding(
          "render service returned an empty document".to_string(),
        ));
      }
      Ok(bytes)
    }
    RenderResult::Base64(text) => {
      let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| DecodeError::CorruptEncoding(e.to_string()))?;
      if bytes.is_empty() {
        return Err(DecodeError::CorruptEncoding(
          "decoded document is empty".to_string(),
        ));
      }
      Ok(bytes)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_binary_passes_through() {
    let bytes = b"%PDF-1.7 fake".to_vec();
    assert_eq!(
      decode_result(RenderResult::Binary(bytes.clone())).unwrap(),
      bytes
    );
  }

  #[test]
  fn test_base64_round_trip_is_exact() {
    let original: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
    let encoded = STANDARD.encode(&original);
    let decoded = decode_result(RenderResult::Base64(encoded)).unwrap();
    assert_eq!(decoded, original);
  }

  #[test]
  fn test_corrupt_base64_fails() {
    let err = decode_result(RenderResult::Base64("not-valid-base64!!!".to_string()))
      .expect_err("corrupt input");
    assert!(matches!(err, DecodeError::CorruptEncoding(_)));
  }

  #[test]
  fn test_empty_payloads_fail() {
    assert!(matches!(
      decode_result(RenderResult::Binary(Vec::new())),
      Err(DecodeError::CorruptEncoding(_))
    ));
    assert!(matches!(
      decode_result(RenderResult::Base64(String::new())),
      Err(DecodeError::CorruptEncoding(_))
    ));
  }

  #[test]
  fn test_surrounding_whitespace_is_tolerated() {
    let encoded = format!("\n{}\n", STANDARD.encode(b"pdf bytes"));
    assert_eq!(
      decode_result(RenderResult::Base64(encoded)).unwrap(),
      b"pdf bytes"
    );
  }
}
