//! Shared test fixtures for the stockroom integration tests.
//!
//! Provides `setup_store()` for an empty in-memory store and builders for
//! sample product and purchase requests.

#![allow(dead_code)]

use stockroom::models::{ProductInput, PurchaseInput};
use stockroom::{ReturnPolicy, Stockroom};

/// Create an empty in-memory store with the default return policy.
pub fn setup_store() -> Stockroom {
    Stockroom::builder().in_memory().build().unwrap()
}

/// Create an empty in-memory store that restocks returned goods.
pub fn setup_restocking_store() -> Stockroom {
    Stockroom::builder()
        .in_memory()
        .return_policy(ReturnPolicy::Restock)
        .build()
        .unwrap()
}

/// A complete add-product request for `title` with `quantity` in stock.
pub fn product_input(title: &str, quantity: i64) -> ProductInput {
    ProductInput {
        title: Some(title.to_string()),
        category: Some("men".into()),
        price: Some(500.0),
        size: Some(vec!["M".to_string(), "L".to_string()].into()),
        colors: Some("Red, Blue".into()),
        image: Some("https://img.example/tee.png".into()),
        in_stock: Some(true),
        quantity: Some(quantity),
    }
}

/// The catalog's usual sample: a men's Tee with 10 in stock.
pub fn tee_input() -> ProductInput {
    product_input("Tee", 10)
}

/// A complete purchase request for `quantity` units of `title`.
pub fn purchase_input(title: &str, quantity: i64) -> PurchaseInput {
    PurchaseInput {
        name: Some("Asha".into()),
        number: Some(serde_json::json!(9876543210u64)),
        title: Some(title.to_string()),
        totalprice: Some(500.0 * quantity as f64),
        quantity: Some(quantity),
        size: Some("M".into()),
        color: Some("Red".into()),
        category: Some("men".into()),
        image: Some("https://img.example/tee.png".into()),
    }
}

/// A purchase request by a named buyer.
pub fn purchase_by(name: &str, number: &str, title: &str, quantity: i64) -> PurchaseInput {
    PurchaseInput {
        name: Some(name.to_string()),
        number: Some(serde_json::json!(number)),
        ..purchase_input(title, quantity)
    }
}
