use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::ledger::{Ledger, LedgerError};
use crate::domain::render::{
  DecodeError, RenderBridge, TransportError, decode_result,
};

use super::assembler::{InvoiceAssembler, InvoiceMetadata};

/// Inputs restored from whatever storage the hosting application uses,
/// passed in explicitly instead of being read from ambient session state.
#[derive(Debug, Clone)]
pub struct SessionContext {
  pub payer_identifier: String,
  pub invoice_date: NaiveDate,
}

/// Everything that can go wrong between "proceed" and a downloadable PDF.
/// None of these invalidate the ledger; the editing session stays usable.
#[derive(Debug, Error)]
pub enum InvoicePdfError {
  #[error(transparent)]
  Ledger(#[from] LedgerError),

  #[error("failed to assemble invoice document: {0}")]
  Assemble(#[from] tera::Error),

  #[error(transparent)]
  Transport(#[from] TransportError),

  #[error(transparent)]
  Decode(#[from] DecodeError),
}

/// The finished downloadable artifact. `bytes` is exactly what the render
/// service produced; nothing is re-encoded on the way out.
#[derive(Debug, Clone)]
pub struct InvoiceArtifact {
  pub file_name: String,
  pub bytes: Vec<u8>,
}

/// End-to-end flow: finalize the ledger, assemble the document, submit it to
/// the render service and decode the result.
pub struct GenerateInvoicePdfUseCase {
  assembler: InvoiceAssembler,
  bridge: Arc<dyn RenderBridge>,
}

impl GenerateInvoicePdfUseCase {
  pub fn new(assembler: InvoiceAssembler, bridge: Arc<dyn RenderBridge>) -> Self {
    Self { assembler, bridge }
  }

  pub async fn execute(
    &self,
    ledger: &Ledger,
    session: &SessionContext,
  ) -> Result<InvoiceArtifact, InvoicePdfError> {
    let items = ledger.finalize()?;
    tracing::info!(items = items.len(), payer = %session.payer_identifier, "assembling invoice");

    let metadata = InvoiceMetadata {
      payer_identifier: session.payer_identifier.clone(),
      date: session.invoice_date,
    };
    let document = self.assembler.assemble(&items, &metadata)?;

    tracing::debug!(bytes = document.len(), "submitting document to render service");
    let result = self.bridge.submit(&document).await?;
    let bytes = decode_result(result)?;

    let file_name = format!("invoice-{}.pdf", Utc::now().timestamp_millis());
    tracing::info!(file = %file_name, size = bytes.len(), "invoice PDF ready");

    Ok(InvoiceArtifact { file_name, bytes })
  }
}
