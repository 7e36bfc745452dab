pub mod entities;
pub mod errors;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use entities::{InvoiceTotals, ItemCandidate, LineItem, TAX_RATE};
pub use errors::{Field, LedgerError, ValidationIssue};
pub use ledger::{FieldEdit, Ledger};
