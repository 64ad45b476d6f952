#![allow(dead_code)]

use std::path::PathBuf;

use bucket_budget::{
    ledger::Ledger,
    storage::{JsonStore, MemoryStore},
};
use rust_decimal::Decimal;
use tempfile::TempDir;

pub fn dec(value: &str) -> Decimal {
    value.parse().expect("decimal literal")
}

/// Ledger backed by a JSON file in a fresh temp dir. Keep the `TempDir` alive for the test.
pub fn json_ledger() -> (Ledger, PathBuf, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("user_data").join("data.json");
    let ledger = Ledger::open(Box::new(JsonStore::new(&path))).expect("open json ledger");
    (ledger, path, temp)
}

pub fn memory_ledger() -> (Ledger, MemoryStore) {
    let store = MemoryStore::new();
    let ledger = Ledger::open(Box::new(store.clone())).expect("open memory ledger");
    (ledger, store)
}
