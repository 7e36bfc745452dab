pub mod assembler;
pub mod generate_pdf;

pub use assembler::{InvoiceAssembler, InvoiceMetadata};
pub use generate_pdf::{
  GenerateInvoicePdfUseCase, InvoiceArtifact, InvoicePdfError, SessionContext,
};
