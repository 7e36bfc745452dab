use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::entities::{InvoiceTotals, ItemCandidate, LineItem};
use super::errors::{Field, LedgerError, ValidationIssue};

const MIN_NAME_LEN: usize = 2;
const MAX_UNIT_PRICE: Decimal = dec!(999_999);
const MAX_QUANTITY: u32 = 10_000;

/// Tagged per-field update. Each variant carries its own typed validation
/// rule, dispatched through this closed set of cases.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
  Name(String),
  UnitPrice(Decimal),
  Quantity(u32),
}

/// The in-memory collection of line items being edited before invoice
/// finalization.
///
/// Single-owner and synchronous: all mutation goes through `&mut self`, so
/// callers serialize edits. Insertion order is display order. The ledger
/// always retains at least one (possibly blank) editable slot.
#[derive(Debug, Clone)]
pub struct Ledger {
  entries: Vec<LineItem>,
}

impl Ledger {
  /// A fresh ledger with a single blank slot.
  pub fn new() -> Self {
    Self {
      entries: vec![LineItem::blank()],
    }
  }

  /// Rebuild a ledger from previously persisted candidates (session input).
  /// Entries that no longer pass validation are skipped with a warning rather
  /// than poisoning the session.
  pub fn restore(saved: Vec<ItemCandidate>) -> Self {
    let mut ledger = Self::new();
    for candidate in saved {
      if let Err(issues) = ledger.add_item(candidate.clone()) {
        tracing::warn!(
          name = %candidate.name,
          issues = issues.len(),
          "skipping saved line item that failed validation"
        );
      }
    }
    ledger
  }

  pub fn entries(&self) -> &[LineItem] {
    &self.entries
  }

  /// Validate and append a new line item.
  ///
  /// Returns every violated constraint, not just the first, so the caller can
  /// surface all issues at once.
  pub fn add_item(&mut self, candidate: ItemCandidate) -> Result<LineItem, Vec<ValidationIssue>> {
    let mut issues = self.validate_candidate(&candidate);

    // Duplicate detection only makes sense for an otherwise valid name.
    if validate_name(&candidate.name).is_ok() && self.name_taken(&candidate.name, None) {
      issues.push(ValidationIssue::new(
        Field::Name,
        "An item with this name already exists",
      ));
    }

    if !issues.is_empty() {
      return Err(issues);
    }

    let item = LineItem::new(candidate.name, candidate.unit_price, candidate.quantity);
    self.entries.push(item.clone());
    Ok(item)
  }

  /// Apply a single-field edit to an existing entry. A failed edit leaves the
  /// entry untouched; other fields keep their state.
  pub fn edit_item(&mut self, id: Uuid, edit: FieldEdit) -> Result<(), ValidationIssue> {
    match &edit {
      FieldEdit::Name(name) => {
        validate_name(name)?;
        if self.name_taken(name, Some(id)) {
          return Err(ValidationIssue::new(
            Field::Name,
            "An item with this name already exists",
          ));
        }
      }
      FieldEdit::UnitPrice(price) => validate_unit_price(*price)?,
      FieldEdit::Quantity(quantity) => validate_quantity(*quantity)?,
    }

    let entry = self
      .entries
      .iter_mut()
      .find(|e| e.id == id)
      .ok_or_else(|| ValidationIssue::new(Field::Name, format!("Unknown line item: {}", id)))?;

    match edit {
      FieldEdit::Name(name) => entry.name = name.trim().to_string(),
      FieldEdit::UnitPrice(price) => entry.unit_price = price,
      FieldEdit::Quantity(quantity) => entry.quantity = quantity,
    }
    Ok(())
  }

  /// Remove an entry. The last remaining slot is protected so the user always
  /// has a row to edit.
  pub fn remove_item(&mut self, id: Uuid) -> Result<(), LedgerError> {
    if !self.entries.iter().any(|e| e.id == id) {
      return Err(LedgerError::ItemNotFound(id));
    }
    if self.entries.len() <= 1 {
      return Err(LedgerError::LastItemProtected);
    }
    self.entries.retain(|e| e.id != id);
    Ok(())
  }

  /// Current totals over non-blank entries. Zero on an effectively empty
  /// ledger.
  pub fn totals(&self) -> InvoiceTotals {
    InvoiceTotals::of(&self.entries)
  }

  /// Read-only snapshot for handoff to the assembler.
  ///
  /// Blank slots are filtered out. Re-checks price and quantity defensively
  /// even though `add_item`/`edit_item` already enforce them.
  pub fn finalize(&self) -> Result<Vec<LineItem>, LedgerError> {
    let items: Vec<LineItem> = self
      .entries
      .iter()
      .filter(|e| !e.is_blank())
      .cloned()
      .collect();

    if items.is_empty() {
      return Err(LedgerError::NoItems);
    }

    if let Some(bad) = items
      .iter()
      .find(|i| i.unit_price <= Decimal::ZERO || i.quantity == 0)
    {
      return Err(LedgerError::IncompleteItem {
        name: bad.name.clone(),
      });
    }

    Ok(items)
  }

  fn validate_candidate(&self, candidate: &ItemCandidate) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if let Err(issue) = validate_name(&candidate.name) {
      issues.push(issue);
    }
    if let Err(issue) = validate_unit_price(candidate.unit_price) {
      issues.push(issue);
    }
    if let Err(issue) = validate_quantity(candidate.quantity) {
      issues.push(issue);
    }
    issues
  }

  /// Case-insensitive duplicate check among non-blank entries, optionally
  /// excluding the entry being edited.
  fn name_taken(&self, name: &str, exclude: Option<Uuid>) -> bool {
    let needle = name.trim().to_lowercase();
    self
      .entries
      .iter()
      .filter(|e| !e.is_blank() && Some(e.id) != exclude)
      .any(|e| e.name.to_lowercase() == needle)
  }
}

impl Default for Ledger {
  fn default() -> Self {
    Self::new()
  }
}

fn validate_name(name: &str) -> Result<(), ValidationIssue> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(ValidationIssue::new(Field::Name, "Item name is required"));
  }
  if trimmed.chars().count() < MIN_NAME_LEN {
    return Err(ValidationIssue::new(
      Field::Name,
      "Item name must be at least 2 characters",
    ));
  }
  Ok(())
}

fn validate_unit_price(price: Decimal) -> Result<(), ValidationIssue> {
  if price <= Decimal::ZERO {
    return Err(ValidationIssue::new(
      Field::Price,
      "Price must be greater than 0",
    ));
  }
  if price > MAX_UNIT_PRICE {
    return Err(ValidationIssue::new(
      Field::Price,
      "Price cannot exceed 999,999",
    ));
  }
  Ok(())
}

fn validate_quantity(quantity: u32) -> Result<(), ValidationIssue> {
  if quantity == 0 {
    return Err(ValidationIssue::new(
      Field::Quantity,
      "Quantity must be greater than 0",
    ));
  }
  if quantity > MAX_QUANTITY {
    return Err(ValidationIssue::new(
      Field::Quantity,
      "Quantity cannot exceed 10,000",
    ));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  fn candidate(name: &str, price: Decimal, quantity: u32) -> ItemCandidate {
    ItemCandidate {
      name: name.to_string(),
      unit_price: price,
      quantity,
    }
  }

  #[test]
  fn test_add_item_success() {
    let mut ledger = Ledger::new();
    let item = ledger
      .add_item(candidate("Widget", dec!(10), 2))
      .expect("valid item");
    assert_eq!(item.name, "Widget");
    assert_eq!(item.line_total(), dec!(20));
    // blank slot + added item
    assert_eq!(ledger.entries().len(), 2);
  }

  #[test]
  fn test_add_item_reports_all_issues_at_once() {
    let mut ledger = Ledger::new();
    let issues = ledger
      .add_item(candidate("", dec!(0), 0))
      .expect_err("invalid item");
    assert_eq!(issues.len(), 3);
    assert!(issues.iter().any(|i| i.field == Field::Name));
    assert!(issues.iter().any(|i| i.field == Field::Price));
    assert!(issues.iter().any(|i| i.field == Field::Quantity));
  }

  #[test]
  fn test_add_item_boundary_values() {
    let mut ledger = Ledger::new();
    assert!(ledger.add_item(candidate("Max", dec!(999_999), 10_000)).is_ok());
    assert!(ledger.add_item(candidate("TooPricey", dec!(999_999.01), 1)).is_err());
    assert!(ledger.add_item(candidate("TooMany", dec!(1), 10_001)).is_err());
    assert!(ledger.add_item(candidate("X", dec!(1), 1)).is_err());
  }

  #[test]
  fn test_duplicate_name_is_case_insensitive() {
    let mut ledger = Ledger::new();
    ledger.add_item(candidate("Widget", dec!(10), 1)).unwrap();
    let issues = ledger
      .add_item(candidate("widget", dec!(5), 1))
      .expect_err("duplicate");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, Field::Name);
  }

  #[test]
  fn test_remove_last_item_protected() {
    let mut ledger = Ledger::new();
    let id = ledger.entries()[0].id;
    let err = ledger.remove_item(id).expect_err("protected");
    assert_eq!(err, LedgerError::LastItemProtected);
    assert_eq!(ledger.entries().len(), 1);
  }

  #[test]
  fn test_remove_item() {
    let mut ledger = Ledger::new();
    let item = ledger.add_item(candidate("Widget", dec!(10), 1)).unwrap();
    assert!(ledger.remove_item(item.id).is_ok());
    assert_eq!(ledger.entries().len(), 1);

    let unknown = Uuid::new_v4();
    ledger.add_item(candidate("Gadget", dec!(10), 1)).unwrap();
    assert_eq!(
      ledger.remove_item(unknown),
      Err(LedgerError::ItemNotFound(unknown))
    );
  }

  #[test]
  fn test_edit_item_per_field() {
    let mut ledger = Ledger::new();
    let item = ledger.add_item(candidate("Widget", dec!(10), 1)).unwrap();

    ledger
      .edit_item(item.id, FieldEdit::UnitPrice(dec!(12.50)))
      .unwrap();
    ledger.edit_item(item.id, FieldEdit::Quantity(4)).unwrap();
    ledger
      .edit_item(item.id, FieldEdit::Name("Sprocket".to_string()))
      .unwrap();

    let entry = &ledger.entries()[1];
    assert_eq!(entry.name, "Sprocket");
    assert_eq!(entry.line_total(), dec!(50.00));
  }

  #[test]
  fn test_edit_item_rejects_invalid_value_and_keeps_entry() {
    let mut ledger = Ledger::new();
    let item = ledger.add_item(candidate("Widget", dec!(10), 1)).unwrap();

    let issue = ledger
      .edit_item(item.id, FieldEdit::UnitPrice(dec!(-1)))
      .expect_err("invalid price");
    assert_eq!(issue.field, Field::Price);
    assert_eq!(ledger.entries()[1].unit_price, dec!(10));
  }

  #[test]
  fn test_edit_item_rejects_duplicate_name() {
    let mut ledger = Ledger::new();
    ledger.add_item(candidate("Widget", dec!(10), 1)).unwrap();
    let other = ledger.add_item(candidate("Gadget", dec!(10), 1)).unwrap();

    let issue = ledger
      .edit_item(other.id, FieldEdit::Name("WIDGET".to_string()))
      .expect_err("duplicate");
    assert_eq!(issue.field, Field::Name);
  }

  #[test]
  fn test_remove_unknown_id_on_single_slot_ledger() {
    let mut ledger = Ledger::new();
    let unknown = Uuid::new_v4();
    assert_eq!(
      ledger.remove_item(unknown),
      Err(LedgerError::ItemNotFound(unknown))
    );
    assert_eq!(ledger.entries().len(), 1);
  }

  #[test]
  fn test_finalize_blank_only_fails_no_items() {
    let ledger = Ledger::new();
    assert_eq!(ledger.finalize(), Err(LedgerError::NoItems));
  }

  #[test]
  fn test_finalize_filters_blank_slots() {
    let mut ledger = Ledger::new();
    ledger.add_item(candidate("Widget", dec!(10), 2)).unwrap();
    let items = ledger.finalize().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Widget");
  }

  #[test]
  fn test_finalize_rejects_corrupt_entry() {
    // Entries normally can't reach this state through add_item/edit_item;
    // finalize still re-checks before handoff.
    let mut ledger = Ledger::new();
    ledger.entries.push(LineItem {
      id: Uuid::new_v4(),
      name: "Ghost".to_string(),
      unit_price: Decimal::ZERO,
      quantity: 3,
    });
    assert_eq!(
      ledger.finalize(),
      Err(LedgerError::IncompleteItem {
        name: "Ghost".to_string()
      })
    );

    ledger.entries[1].unit_price = dec!(10);
    ledger.entries[1].quantity = 0;
    assert_eq!(
      ledger.finalize(),
      Err(LedgerError::IncompleteItem {
        name: "Ghost".to_string()
      })
    );
  }

  #[test]
  fn test_totals_example() {
    let mut ledger = Ledger::new();
    ledger.add_item(candidate("A", dec!(10), 2)).unwrap();
    ledger.add_item(candidate("B", dec!(5), 3)).unwrap();

    let totals = ledger.totals();
    assert_eq!(totals.sub_total, dec!(35));
    assert_eq!(totals.tax_total, dec!(6.30));
    assert_eq!(totals.grand_total, dec!(41.30));
  }

  #[test]
  fn test_ledger_usable_after_validation_failure() {
    let mut ledger = Ledger::new();
    ledger.add_item(candidate("", dec!(0), 0)).expect_err("invalid");
    ledger.add_item(candidate("Widget", dec!(10), 1)).unwrap();
    assert_eq!(ledger.totals().sub_total, dec!(10));
  }

  #[test]
  fn test_restore_skips_invalid_saved_items() {
    let saved = vec![
      candidate("Widget", dec!(10), 2),
      candidate("", dec!(0), 0),
      candidate("Gadget", dec!(5), 3),
    ];
    let ledger = Ledger::restore(saved);
    let items = ledger.finalize().unwrap();
    assert_eq!(items.len(), 2);
  }
}
