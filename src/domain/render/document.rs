use std::fmt;

/// Opaque markup payload representing the full visual invoice.
///
/// Constructed once per render request and never mutated; the rendering
/// service treats it as an opaque blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableDocument(String);

impl RenderableDocument {
  pub fn new(markup: String) -> Self {
    Self(markup)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl fmt::Display for RenderableDocument {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
