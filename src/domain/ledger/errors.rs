use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The closed set of user-editable fields on a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
  Name,
  Price,
  Quantity,
}

impl Field {
  pub fn as_str(&self) -> &'static str {
    match self {
      Field::Name => "name",
      Field::Price => "price",
      Field::Quantity => "quantity",
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A single field-level validation failure. Transient: it exists only between
/// a failed attempt and the next successful edit of that field.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize)]
#[error("{field}: {message}")]
pub struct ValidationIssue {
  pub field: Field,
  pub message: String,
}

impl ValidationIssue {
  pub fn new(field: Field, message: impl Into<String>) -> Self {
    Self {
      field,
      message: message.into(),
    }
  }
}

/// Invariant violations on the ledger itself. These block proceeding but are
/// never fatal to the editing session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
  #[error("at least one line item row must remain")]
  LastItemProtected,

  #[error("line item not found: {0}")]
  ItemNotFound(Uuid),

  #[error("add at least one line item before proceeding")]
  NoItems,

  #[error("line item '{name}' has an invalid price or quantity")]
  IncompleteItem { name: String },
}
