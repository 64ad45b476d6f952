//! Budget record model and the transitions applied to it.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod record;

pub use ledger::Ledger;
pub use record::{Bucket, BudgetRecord};
