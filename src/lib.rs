#![doc(test(attr(deny(warnings))))]

//! Needs/wants/savings envelope budgeting: a single persisted budget record,
//! the transitions that mutate it, and the shell that drives them.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
///
/// `filter` is used when `RUST_LOG` is unset.
pub fn init(filter: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(filter);
        tracing::info!("bucket_budget tracing initialized.");
    });
}
