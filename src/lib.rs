//! Stockroom: inventory and point-of-sale storage.
//!
//! Keeps a product catalog, a ledger of purchases and a ledger of returns in
//! an embedded DuckDB database. Selling a product decrements its stock and
//! records a purchase; returning a purchase moves it into the returns ledger.
//!
//! # Quick start
//!
//! ```no_run
//! use stockroom::models::{ProductInput, PurchaseInput};
//! use stockroom::Stockroom;
//!
//! let store = Stockroom::builder().in_memory().build().unwrap();
//!
//! store.products().add(ProductInput {
//!     title: Some("Tee".into()),
//!     category: Some("men".into()),
//!     price: Some(500.0),
//!     size: Some(vec!["M".to_string()].into()),
//!     colors: Some("Red".into()),
//!     image: Some("https://img.example/tee.png".into()),
//!     in_stock: Some(true),
//!     quantity: Some(10),
//! }).unwrap();
//!
//! let receipt = store.purchases().register(PurchaseInput {
//!     name: Some("Asha".into()),
//!     number: Some(serde_json::json!(9876543210u64)),
//!     title: Some("Tee".into()),
//!     totalprice: Some(1500.0),
//!     quantity: Some(3),
//!     size: Some("M".into()),
//!     color: Some("Red".into()),
//!     category: Some("men".into()),
//!     image: Some("https://img.example/tee.png".into()),
//! }).unwrap();
//! assert_eq!(receipt.remaining_stock, 7);
//!
//! store.returns().create_from_purchase(&receipt.purchase.id).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod models;
pub mod queries;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncStockroom;
pub use connection::Connection;
pub use error::{Result, StockroomError};
pub use queries::ReturnPolicy;
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// StockroomBuilder
// ---------------------------------------------------------------------------

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    /// Platform data directory, see [`config::default_database_path`].
    Default,
    File(PathBuf),
    InMemory,
}

/// Builder for configuring and constructing a [`Stockroom`] instance.
///
/// Use [`Stockroom::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](StockroomBuilder::build) to open the store.
#[derive(Debug, Clone)]
pub struct StockroomBuilder {
    storage: Storage,
    return_policy: ReturnPolicy,
}

impl Default for StockroomBuilder {
    fn default() -> Self {
        Self {
            storage: Storage::Default,
            return_policy: ReturnPolicy::Keep,
        }
    }
}

impl StockroomBuilder {
    /// Store data in the DuckDB file at `path`, creating it if needed.
    pub fn database<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage = Storage::File(path.as_ref().to_path_buf());
        self
    }

    /// Keep all data in memory. Nothing survives the process.
    pub fn in_memory(mut self) -> Self {
        self.storage = Storage::InMemory;
        self
    }

    pub fn storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    /// Choose whether processing a return restocks the product.
    ///
    /// Defaults to [`ReturnPolicy::Keep`].
    pub fn return_policy(mut self, policy: ReturnPolicy) -> Self {
        self.return_policy = policy;
        self
    }

    /// Open the database and create the tables if they do not exist yet.
    pub fn build(self) -> Result<Stockroom> {
        let conn = match self.storage {
            Storage::Default => Connection::open(config::default_database_path())?,
            Storage::File(path) => Connection::open(path)?,
            Storage::InMemory => Connection::open_in_memory()?,
        };
        Ok(Stockroom {
            conn,
            return_policy: self.return_policy,
        })
    }
}

// ---------------------------------------------------------------------------
// Stockroom
// ---------------------------------------------------------------------------

/// The main entry point to the store.
///
/// Owns the [`Connection`] and exposes one lightweight borrowing query
/// interface per entity.
pub struct Stockroom {
    conn: Connection,
    return_policy: ReturnPolicy,
}

impl Stockroom {
    /// Create a new builder for configuring the store.
    pub fn builder() -> StockroomBuilder {
        StockroomBuilder::default()
    }

    /// Access the product catalog.
    pub fn products(&self) -> queries::products::ProductQuery<'_> {
        queries::products::ProductQuery::new(&self.conn)
    }

    /// Access purchase registration and history.
    pub fn purchases(&self) -> queries::purchases::PurchaseQuery<'_> {
        queries::purchases::PurchaseQuery::new(&self.conn)
    }

    /// Access return processing, bound to the configured [`ReturnPolicy`].
    pub fn returns(&self) -> queries::returns::ReturnQuery<'_> {
        queries::returns::ReturnQuery::new(&self.conn, self.return_policy)
    }

    pub fn return_policy(&self) -> ReturnPolicy {
        self.return_policy
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl fmt::Display for Stockroom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stockroom(database={}, return_policy={})",
            self.conn.location(),
            self.return_policy
        )
    }
}
