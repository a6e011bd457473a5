//! Return processing: moving a purchase into the returns ledger.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

use super::ledger::{count_entries, delete_entry, get_entry, insert_entry, list_entries, LedgerFilter};
use super::products::ProductQuery;
use crate::config::{PURCHASES_TABLE, RETURNS_TABLE};
use crate::connection::Connection;
use crate::error::{Result, StockroomError};
use crate::models::{now, LedgerPage, ReturnRecord};

// ---------------------------------------------------------------------------
// ReturnPolicy
// ---------------------------------------------------------------------------

/// What a processed return does to the product's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnPolicy {
    /// Leave stock untouched; returned goods are not resold.
    #[default]
    Keep,
    /// Put the returned quantity back into the product's stock.
    Restock,
}

impl fmt::Display for ReturnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnPolicy::Keep => f.write_str("keep"),
            ReturnPolicy::Restock => f.write_str("restock"),
        }
    }
}

impl FromStr for ReturnPolicy {
    type Err = StockroomError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" | "false" | "0" | "no" => Ok(ReturnPolicy::Keep),
            "restock" | "true" | "1" | "yes" => Ok(ReturnPolicy::Restock),
            other => Err(StockroomError::InvalidArgument(format!(
                "unknown return policy `{other}`"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ReturnQuery
// ---------------------------------------------------------------------------

/// Query interface for the returns ledger.
pub struct ReturnQuery<'a> {
    conn: &'a Connection,
    policy: ReturnPolicy,
}

impl<'a> ReturnQuery<'a> {
    pub fn new(conn: &'a Connection, policy: ReturnPolicy) -> Self {
        Self { conn, policy }
    }

    pub fn policy(&self) -> ReturnPolicy {
        self.policy
    }

    /// Convert the purchase with `purchase_id` into a return.
    ///
    /// The return keeps every field of the purchase, including its id, and
    /// gets the current time as `date`. Inserting the return, deleting the
    /// purchase and any restock happen in one transaction.
    pub fn create_from_purchase(&self, purchase_id: &str) -> Result<ReturnRecord> {
        let purchase_id = purchase_id.trim();
        if purchase_id.is_empty() {
            return Err(StockroomError::Validation("consumerId is required".into()));
        }

        let policy = self.policy;
        let record = self.conn.transaction(|conn| {
            let purchase = get_entry(conn, PURCHASES_TABLE, purchase_id)?
                .ok_or_else(|| StockroomError::NotFound("Consumer record not found".into()))?;

            let record = ReturnRecord {
                date: now(),
                ..purchase
            };
            insert_entry(conn, RETURNS_TABLE, &record)?;
            delete_entry(conn, PURCHASES_TABLE, purchase_id)?;

            if policy == ReturnPolicy::Restock {
                let products = ProductQuery::new(conn);
                match products.get_by_title(&record.title)? {
                    Some(product) => products.adjust_stock(&product.id, record.quantity)?,
                    None => warn!(
                        title = %record.title,
                        "Returned product no longer exists; stock not restored"
                    ),
                }
            }

            Ok(record)
        })?;

        info!(id = %record.id, title = %record.title, %policy, "Return recorded");
        Ok(record)
    }

    /// One page of returns, most recent first.
    pub fn list(&self, page: usize, filter: &LedgerFilter) -> Result<LedgerPage<ReturnRecord>> {
        let listed = list_entries(self.conn, RETURNS_TABLE, page, filter)?;
        debug!(
            page = listed.page.page,
            total = listed.page.total_count,
            "Listed returns"
        );
        Ok(listed)
    }

    /// Fetch one return by id (the id of the purchase it came from).
    pub fn get(&self, id: &str) -> Result<Option<ReturnRecord>> {
        get_entry(self.conn, RETURNS_TABLE, id)
    }

    pub fn count(&self) -> Result<usize> {
        count_entries(self.conn, RETURNS_TABLE)
    }
}
