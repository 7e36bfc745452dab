use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::domain::render::{PdfEngine, RenderError, RenderableDocument};

use super::pool::RenderPool;

const DEFAULT_BINARY: &str = "wkhtmltopdf";

/// Headless-browser renderer backed by the `wkhtmltopdf` binary (WebKit).
///
/// One engine process per admitted request: markup is streamed over stdin and
/// A4 PDF bytes (background graphics on) are collected from stdout, so no
/// intermediate files are written. The process is killed if it outlives the
/// render timeout.
pub struct WkHtmlToPdfEngine {
  binary_path: String,
  args: Vec<String>,
  render_timeout: Duration,
  pool: RenderPool,
}

impl WkHtmlToPdfEngine {
  pub fn new(binary_path: Option<String>, render_timeout: Duration, pool: RenderPool) -> Self {
    Self {
      binary_path: binary_path.unwrap_or_else(|| DEFAULT_BINARY.to_string()),
      args: [
        "--page-size",
        "A4",
        "--encoding",
        "utf-8",
        "--background",
        "--quiet",
        "-",
        "-",
      ]
      .iter()
      .map(|s| s.to_string())
      .collect(),
      render_timeout,
      pool,
    }
  }

  /// Startup probe so a missing binary is reported once at boot instead of on
  /// the first request.
  pub async fn verify_installed(&self) -> Result<(), RenderError> {
    let output = Command::new(&self.binary_path)
      .arg("--version")
      .output()
      .await
      .map_err(|e| {
        RenderError::LaunchFailure(format!(
          "{} not found: {}. Please install wkhtmltopdf.",
          self.binary_path, e
        ))
      })?;

    if !output.status.success() {
      return Err(RenderError::LaunchFailure(format!(
        "{} is not working correctly",
        self.binary_path
      )));
    }

    Ok(())
  }
}

#[async_trait]
impl PdfEngine for WkHtmlToPdfEngine {
  async fn render(&self, document: &RenderableDocument) -> Result<Vec<u8>, RenderError> {
    // Released on every exit path, including panics and timeouts.
    let _permit = self.pool.admit().await?;

    let mut child = Command::new(&self.binary_path)
      .args(&self.args)
      .stdin(Stdio::piped())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(true)
      .spawn()
      .map_err(|e| RenderError::LaunchFailure(e.to_string()))?;

    // The timeout must cover the whole child interaction, including the
    // stdin handoff: an engine that stalls without consuming its input would
    // otherwise hold the permit for as long as the process lives. On timeout
    // the cancelled future drops the child, and kill_on_drop forcibly tears
    // the process down.
    let interaction = async {
      let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| RenderError::LaunchFailure("failed to open engine stdin".to_string()))?;
      stdin
        .write_all(document.as_str().as_bytes())
        .await
        .map_err(|e| RenderError::EngineCrash(format!("engine rejected input: {}", e)))?;
      // EOF on stdin tells the engine the whole document has arrived.
      drop(stdin);

      child
        .wait_with_output()
        .await
        .map_err(|e| RenderError::EngineCrash(e.to_string()))
    };

    let output = tokio::time::timeout(self.render_timeout, interaction)
      .await
      .map_err(|_| {
        tracing::warn!(timeout = ?self.render_timeout, "render timed out, killing engine process");
        RenderError::RenderTimeout(self.render_timeout)
      })??;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      tracing::error!(status = ?output.status, "rendering engine exited abnormally");
      return Err(RenderError::EngineCrash(format!(
        "engine exited with {}: {}",
        output.status,
        stderr.trim()
      )));
    }

    if output.stdout.is_empty() {
      return Err(RenderError::EngineCrash(
        "engine produced no output".to_string(),
      ));
    }

    tracing::debug!(size = output.stdout.len(), "render complete");
    Ok(output.stdout)
  }
}
