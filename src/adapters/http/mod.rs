pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod routes;

pub use dtos::{ErrorResponse, HealthResponse, RenderRequest, RenderResponse};
pub use errors::ApiError;
pub use handlers::{health_handler, render_handler};
pub use routes::configure_render_routes;
