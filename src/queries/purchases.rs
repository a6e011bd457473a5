//! Purchase registration and purchase history.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ledger::{count_entries, get_entry, insert_entry, list_entries, LedgerFilter};
use super::new_id;
use super::products::ProductQuery;
use crate::config::PURCHASES_TABLE;
use crate::connection::Connection;
use crate::error::{Result, StockroomError};
use crate::models::{now, LedgerPage, Purchase, PurchaseInput};

/// Outcome of a registered purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub purchase: Purchase,
    /// Product stock left after the sale.
    pub remaining_stock: i64,
}

/// Query interface for the purchase (consumer) ledger.
pub struct PurchaseQuery<'a> {
    conn: &'a Connection,
}

impl<'a> PurchaseQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Sell `quantity` units of the product named by `title`.
    ///
    /// The stock decrement and the purchase insert share one transaction:
    /// either both are stored or neither is. Validation, unknown titles and
    /// insufficient stock are all detected before anything is written.
    pub fn register(&self, input: PurchaseInput) -> Result<PurchaseReceipt> {
        let request = input.into_new_purchase()?;

        let receipt = self.conn.transaction(|conn| {
            let products = ProductQuery::new(conn);
            let product = products
                .get_by_title(&request.title)?
                .ok_or_else(|| StockroomError::NotFound("Product not found".into()))?;

            if request.quantity > product.quantity {
                return Err(StockroomError::InsufficientStock {
                    title: product.title,
                    requested: request.quantity,
                    available: product.quantity,
                });
            }

            products.adjust_stock(&product.id, -request.quantity)?;

            let purchase = Purchase {
                id: new_id(),
                name: request.name.clone(),
                number: request.number.clone(),
                title: request.title.clone(),
                category: request.category,
                price: request.price,
                quantity: request.quantity,
                size: vec![request.size],
                colors: vec![request.color.clone()],
                image: request.image.clone(),
                date: now(),
            };
            insert_entry(conn, PURCHASES_TABLE, &purchase)?;

            Ok(PurchaseReceipt {
                purchase,
                remaining_stock: product.quantity - request.quantity,
            })
        })?;

        info!(
            id = %receipt.purchase.id,
            title = %receipt.purchase.title,
            quantity = receipt.purchase.quantity,
            remaining = receipt.remaining_stock,
            "Purchase registered"
        );
        Ok(receipt)
    }

    /// One page of purchases, most recent first.
    pub fn list(&self, page: usize, filter: &LedgerFilter) -> Result<LedgerPage<Purchase>> {
        let listed = list_entries(self.conn, PURCHASES_TABLE, page, filter)?;
        debug!(
            page = listed.page.page,
            total = listed.page.total_count,
            "Listed purchases"
        );
        Ok(listed)
    }

    /// Fetch one purchase by id.
    pub fn get(&self, id: &str) -> Result<Option<Purchase>> {
        get_entry(self.conn, PURCHASES_TABLE, id)
    }

    pub fn count(&self) -> Result<usize> {
        count_entries(self.conn, PURCHASES_TABLE)
    }
}
