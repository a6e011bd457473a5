//! Query modules for the stockroom store.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes the operations of
//! one entity as methods returning typed `Result<T>` values.

pub mod ledger;
pub mod products;
pub mod purchases;
pub mod returns;

pub use ledger::LedgerFilter;
pub use products::{ProductFilter, ProductQuery};
pub use purchases::{PurchaseQuery, PurchaseReceipt};
pub use returns::{ReturnPolicy, ReturnQuery};

use duckdb::types::Value;
use serde::Serialize;

use crate::error::Result;

pub(crate) fn text(s: impl Into<String>) -> Value {
    Value::Text(s.into())
}

/// Bind a list field as JSON text.
pub(crate) fn json_text<T: Serialize>(value: &T) -> Result<Value> {
    Ok(Value::Text(serde_json::to_string(value)?))
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Read a non-negative integer column out of a row, defaulting to zero.
pub(crate) fn count_of(value: Option<&serde_json::Value>) -> usize {
    value
        .and_then(|v| v.as_u64())
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}
