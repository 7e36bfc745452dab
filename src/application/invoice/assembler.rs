use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tera::{Context, Tera};

use crate::domain::ledger::{InvoiceTotals, LineItem};
use crate::domain::render::RenderableDocument;

/// Invoice metadata supplied by the caller instead of being looked up from
/// ambient session state.
#[derive(Debug, Clone)]
pub struct InvoiceMetadata {
  pub payer_identifier: String,
  pub date: NaiveDate,
}

/// The single fixed invoice layout, embedded so the assembler is
/// self-contained and deterministic.
const INVOICE_TEMPLATE: &str = include_str!("invoice.html");

#[derive(Serialize)]
struct Row {
  name: String,
  quantity: u32,
  unit_price: String,
  line_total: String,
}

/// Converts a finalized item list into the renderable invoice document.
///
/// Pure transformation: same items and metadata always produce the same
/// markup. The template is compiled once at construction; `assemble` does not
/// fail for any item list accepted by `Ledger::finalize`.
pub struct InvoiceAssembler {
  tera: Tera,
}

impl InvoiceAssembler {
  pub fn new() -> Result<Self, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("invoice.html", INVOICE_TEMPLATE)?;
    Ok(Self { tera })
  }

  pub fn assemble(
    &self,
    items: &[LineItem],
    metadata: &InvoiceMetadata,
  ) -> Result<RenderableDocument, tera::Error> {
    let totals = InvoiceTotals::of(items);

    let rows: Vec<Row> = items
      .iter()
      .map(|item| Row {
        name: item.name.clone(),
        quantity: item.quantity,
        unit_price: money(item.unit_price),
        line_total: money(item.line_total()),
      })
      .collect();

    let mut context = Context::new();
    context.insert("payer", &metadata.payer_identifier);
    context.insert("date", &metadata.date.format("%d/%m/%Y").to_string());
    context.insert("rows", &rows);
    context.insert("sub_total", &money(totals.sub_total));
    context.insert("tax_total", &money(totals.tax_total));
    context.insert("grand_total", &money(totals.grand_total));

    let markup = self.tera.render("invoice.html", &context)?;
    Ok(RenderableDocument::new(markup))
  }
}

/// Two-decimal money formatting used everywhere in the document.
fn money(amount: Decimal) -> String {
  format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  fn metadata() -> InvoiceMetadata {
    InvoiceMetadata {
      payer_identifier: "payer@example.com".to_string(),
      date: NaiveDate::from_ymd_opt(2026, 8, 27).unwrap(),
    }
  }

  #[test]
  fn test_assemble_embeds_rows_and_totals() {
    let assembler = InvoiceAssembler::new().unwrap();
    let items = vec![
      LineItem::new("A".to_string(), dec!(10), 2),
      LineItem::new("B".to_string(), dec!(5), 3),
    ];

    let document = assembler.assemble(&items, &metadata()).unwrap();
    let html = document.as_str();

    assert!(html.contains("payer@example.com"));
    assert!(html.contains("27/08/2026"));
    assert!(html.contains(">A<"));
    assert!(html.contains(">B<"));
    assert!(html.contains("35.00"));
    assert!(html.contains("6.30"));
    assert!(html.contains("41.30"));
  }

  #[test]
  fn test_assemble_formats_two_decimal_places() {
    let assembler = InvoiceAssembler::new().unwrap();
    let items = vec![LineItem::new("Bolt".to_string(), dec!(12.346), 1)];

    let document = assembler.assemble(&items, &metadata()).unwrap();
    assert!(document.as_str().contains("12.35"));
  }

  #[test]
  fn test_assemble_is_deterministic() {
    let assembler = InvoiceAssembler::new().unwrap();
    let items = vec![LineItem::new("Widget".to_string(), dec!(10), 2)];

    let first = assembler.assemble(&items, &metadata()).unwrap();
    let second = assembler.assemble(&items, &metadata()).unwrap();
    assert_eq!(first, second);
  }

  #[test]
  fn test_assemble_escapes_markup_in_names() {
    let assembler = InvoiceAssembler::new().unwrap();
    let items = vec![LineItem::new("<script>x</script>".to_string(), dec!(1), 1)];

    let document = assembler.assemble(&items, &metadata()).unwrap();
    assert!(!document.as_str().contains("<script>x</script>"));
  }
}
