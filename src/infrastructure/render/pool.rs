use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::domain::render::RenderError;

/// Fixed-size admission pool for rendering engine processes.
///
/// At most `max_concurrent` renders run at once. A request waits up to
/// `queue_wait` for a free slot and is then rejected with `ServiceBusy`
/// instead of queuing indefinitely. Permits are RAII: dropping one releases
/// the slot even when the render fails.
#[derive(Clone)]
pub struct RenderPool {
  permits: Arc<Semaphore>,
  queue_wait: Duration,
}

impl RenderPool {
  pub fn new(max_concurrent: usize, queue_wait: Duration) -> Self {
    Self {
      permits: Arc::new(Semaphore::new(max_concurrent)),
      queue_wait,
    }
  }

  pub async fn admit(&self) -> Result<OwnedSemaphorePermit, RenderError> {
    match tokio::time::timeout(self.queue_wait, self.permits.clone().acquire_owned()).await {
      Ok(Ok(permit)) => Ok(permit),
      // The semaphore is never closed while the pool is alive.
      Ok(Err(_)) => Err(RenderError::LaunchFailure("render pool closed".to_string())),
      Err(_) => {
        tracing::warn!(wait = ?self.queue_wait, "render admission rejected: pool exhausted");
        Err(RenderError::ServiceBusy)
      }
    }
  }

  pub fn available(&self) -> usize {
    self.permits.available_permits()
  }
}
