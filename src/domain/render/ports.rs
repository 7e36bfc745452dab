use async_trait::async_trait;

use super::document::RenderableDocument;
use super::errors::{RenderError, TransportError};
use super::result::RenderResult;

/// Server-side rendering engine: markup in, paginated PDF bytes out.
#[async_trait]
pub trait PdfEngine: Send + Sync {
  async fn render(&self, document: &RenderableDocument) -> Result<Vec<u8>, RenderError>;
}

/// Client-side transport to the render service.
#[async_trait]
pub trait RenderBridge: Send + Sync {
  async fn submit(&self, document: &RenderableDocument) -> Result<RenderResult, TransportError>;
}
