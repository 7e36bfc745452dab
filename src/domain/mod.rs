pub mod ledger;
pub mod render;
