pub mod decoder;
pub mod document;
pub mod errors;
pub mod ports;
pub mod result;

pub use decoder::decode_result;
pub use document::RenderableDocument;
pub use errors::{DecodeError, RenderError, TransportError};
pub use ports::{PdfEngine, RenderBridge};
pub use result::{RenderResult, ResponseContract};
