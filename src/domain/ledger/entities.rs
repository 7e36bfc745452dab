use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// GST rate applied to every line total. Process-wide constant.
pub const TAX_RATE: Decimal = dec!(0.18);

/// Raw user input for a new line item, prior to validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCandidate {
  pub name: String,
  pub unit_price: Decimal,
  pub quantity: u32,
}

/// A single priced line of the invoice.
///
/// `line_total` and `tax` are never stored: they are recomputed from
/// `unit_price` and `quantity` on every access, so the derived values can
/// never drift from their inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  pub id: Uuid,
  pub name: String,
  pub unit_price: Decimal,
  pub quantity: u32,
}

impl LineItem {
  pub fn new(name: String, unit_price: Decimal, quantity: u32) -> Self {
    Self {
      id: Uuid::new_v4(),
      name: name.trim().to_string(),
      unit_price,
      quantity,
    }
  }

  /// An empty editable slot. The ledger always keeps at least one of these
  /// around so the user has a row to type into.
  pub fn blank() -> Self {
    Self {
      id: Uuid::new_v4(),
      name: String::new(),
      unit_price: Decimal::ZERO,
      quantity: 0,
    }
  }

  pub fn is_blank(&self) -> bool {
    self.name.trim().is_empty()
  }

  pub fn line_total(&self) -> Decimal {
    self.unit_price * Decimal::from(self.quantity)
  }

  pub fn tax(&self) -> Decimal {
    (self.line_total() * TAX_RATE).round_dp(2)
  }
}

/// Derived invoice totals. Never stored, always recomputed from the items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceTotals {
  pub sub_total: Decimal,
  pub tax_total: Decimal,
  pub grand_total: Decimal,
}

impl InvoiceTotals {
  pub fn zero() -> Self {
    Self {
      sub_total: Decimal::ZERO,
      tax_total: Decimal::ZERO,
      grand_total: Decimal::ZERO,
    }
  }

  /// Sums over the given items; blank slots contribute nothing.
  pub fn of(items: &[LineItem]) -> Self {
    let mut sub_total = Decimal::ZERO;
    let mut tax_total = Decimal::ZERO;

    for item in items.iter().filter(|i| !i.is_blank()) {
      sub_total += item.line_total();
      tax_total += item.tax();
    }

    Self {
      sub_total,
      tax_total,
      grand_total: sub_total + tax_total,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_line_total_and_tax_are_derived() {
    let item = LineItem::new("Widget".to_string(), dec!(10), 2);
    assert_eq!(item.line_total(), dec!(20));
    assert_eq!(item.tax(), dec!(3.60));

    let item = LineItem::new("Gadget".to_string(), dec!(999999), 10000);
    assert_eq!(item.line_total(), dec!(9999990000));
    assert_eq!(item.tax(), dec!(1799998200.00));
  }

  #[test]
  fn test_tax_rounds_to_two_decimals() {
    // 0.01 * 1 * 0.18 = 0.0018 -> 0.00
    let item = LineItem::new("Pin".to_string(), dec!(0.01), 1);
    assert_eq!(item.tax(), dec!(0.00));

    // 12.34 * 3 * 0.18 = 6.6636 -> 6.66
    let item = LineItem::new("Bolt".to_string(), dec!(12.34), 3);
    assert_eq!(item.tax(), dec!(6.66));
  }

  #[test]
  fn test_blank_slot() {
    let slot = LineItem::blank();
    assert!(slot.is_blank());
    assert_eq!(slot.line_total(), Decimal::ZERO);
    assert_eq!(slot.tax(), Decimal::ZERO);
  }

  #[test]
  fn test_totals_over_items() {
    let items = vec![
      LineItem::new("A".to_string(), dec!(10), 2),
      LineItem::new("B".to_string(), dec!(5), 3),
    ];
    let totals = InvoiceTotals::of(&items);
    assert_eq!(totals.sub_total, dec!(35));
    assert_eq!(totals.tax_total, dec!(6.30));
    assert_eq!(totals.grand_total, dec!(41.30));
  }

  #[test]
  fn test_totals_skip_blank_slots() {
    let items = vec![LineItem::blank(), LineItem::new("A".to_string(), dec!(1), 1)];
    let totals = InvoiceTotals::of(&items);
    assert_eq!(totals.sub_total, dec!(1));
  }

  #[test]
  fn test_totals_zero_on_empty() {
    assert_eq!(InvoiceTotals::of(&[]), InvoiceTotals::zero());
  }
}
