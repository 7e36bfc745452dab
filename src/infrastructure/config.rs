use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::domain::render::ResponseContract;

// Default value functions
fn default_max_body_bytes() -> usize {
  5 * 1024 * 1024
}

fn default_max_concurrent_renders() -> usize {
  4
}

fn default_queue_wait_seconds() -> u64 {
  2
}

fn default_render_timeout_seconds() -> u64 {
  30
}

fn default_request_timeout_seconds() -> u64 {
  45
}

fn default_contract() -> ResponseContract {
  ResponseContract::Base64Json
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub render: RenderConfig,
  pub bridge: BridgeConfig,
}

/// Render service HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
  /// Maximum accepted request body size; larger payloads get 413.
  #[serde(default = "default_max_body_bytes")]
  pub max_body_bytes: usize,
}

/// Rendering engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
  /// Path to the wkhtmltopdf binary; resolved from PATH when unset.
  pub engine_path: Option<String>,
  #[serde(default = "default_max_concurrent_renders")]
  pub max_concurrent_renders: usize,
  /// How long a request may wait for a free render slot before ServiceBusy.
  #[serde(default = "default_queue_wait_seconds")]
  pub queue_wait_seconds: u64,
  /// Wall-clock bound on a single engine process.
  #[serde(default = "default_render_timeout_seconds")]
  pub render_timeout_seconds: u64,
  /// Wire shape the server emits for successful renders.
  #[serde(default = "default_contract")]
  pub response_contract: ResponseContract,
}

/// Client-side bridge configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
  /// Full URL of the render endpoint, e.g. http://localhost:4001/render
  pub endpoint: String,
  #[serde(default = "default_request_timeout_seconds")]
  pub request_timeout_seconds: u64,
  /// Wire shape the bridge expects; must match the server it talks to.
  #[serde(default = "default_contract")]
  pub response_contract: ResponseContract,
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Sources are layered, later ones overriding earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with INVOPRESS_ prefix
  ///
  /// Environment variables use double underscores as section separators:
  /// - `INVOPRESS_SERVER__PORT=4001`
  /// - `INVOPRESS_RENDER__MAX_CONCURRENT_RENDERS=8`
  /// - `INVOPRESS_BRIDGE__ENDPOINT=http://render:4001/render`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("INVOPRESS")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?;

    config.try_deserialize()
  }
}
