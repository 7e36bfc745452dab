use actix_web::{App, HttpServer, middleware::Logger};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invopress::{
  adapters::http::configure_render_routes,
  domain::render::PdfEngine,
  infrastructure::{
    config::Config,
    render::{RenderPool, WkHtmlToPdfEngine},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invopress=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Invopress render service");

  let config = Config::load().map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;
  tracing::info!("Configuration loaded successfully");

  let pool = RenderPool::new(
    config.render.max_concurrent_renders,
    Duration::from_secs(config.render.queue_wait_seconds),
  );
  let engine = WkHtmlToPdfEngine::new(
    config.render.engine_path.clone(),
    Duration::from_secs(config.render.render_timeout_seconds),
    pool,
  );

  // A missing binary should be visible at boot, not on the first request.
  if let Err(e) = engine.verify_installed().await {
    tracing::warn!("rendering engine check failed: {}", e);
  }

  let engine: Arc<dyn PdfEngine> = Arc::new(engine);
  let contract = config.render.response_contract;
  let max_body_bytes = config.server.max_body_bytes;

  tracing::info!(
    host = %config.server.host,
    port = config.server.port,
    contract = %contract,
    max_concurrent = config.render.max_concurrent_renders,
    "render service listening"
  );

  HttpServer::new(move || {
    App::new()
      .wrap(Logger::default())
      .configure(|cfg| configure_render_routes(cfg, engine.clone(), contract, max_body_bytes))
  })
  .bind((config.server.host.as_str(), config.server.port))?
  .run()
  .await?;

  Ok(())
}
