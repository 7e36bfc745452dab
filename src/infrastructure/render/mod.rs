pub mod bridge;
pub mod engine;
pub mod pool;

pub use bridge::HttpRenderBridge;
pub use engine::WkHtmlToPdfEngine;
pub use pool::RenderPool;
