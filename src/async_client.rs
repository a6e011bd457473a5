//! Async wrapper around [`Stockroom`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every store operation on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! store sits behind a [`Mutex`], so operations from concurrent requests are
//! applied one at a time.
//!
//! # Example
//!
//! ```no_run
//! use stockroom::queries::ProductFilter;
//! use stockroom::AsyncStockroom;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let store = AsyncStockroom::builder().in_memory().build().await.unwrap();
//!
//!     let page = store
//!         .run(|s| s.products().list(1, &ProductFilter::default()))
//!         .await
//!         .unwrap();
//!     assert_eq!(page.total_count, 0);
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::error::{Result, StockroomError};
use crate::{ReturnPolicy, Stockroom, StockroomBuilder};

// ---------------------------------------------------------------------------
// AsyncStockroomBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncStockroom`] instance.
#[derive(Debug, Clone, Default)]
pub struct AsyncStockroomBuilder {
    inner: StockroomBuilder,
}

impl AsyncStockroomBuilder {
    /// Store data in the DuckDB file at `path`.
    pub fn database<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.inner = self.inner.database(path);
        self
    }

    /// Keep all data in memory.
    pub fn in_memory(mut self) -> Self {
        self.inner = self.inner.in_memory();
        self
    }

    pub fn storage(mut self, storage: crate::Storage) -> Self {
        self.inner = self.inner.storage(storage);
        self
    }

    pub fn return_policy(mut self, policy: ReturnPolicy) -> Self {
        self.inner = self.inner.return_policy(policy);
        self
    }

    /// Open the store on the blocking thread pool.
    pub async fn build(self) -> Result<AsyncStockroom> {
        let builder = self.inner;
        tokio::task::spawn_blocking(move || builder.build().map(AsyncStockroom::new))
            .await
            .map_err(|e| StockroomError::Internal(format!("Store task failed: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncStockroom
// ---------------------------------------------------------------------------

/// Async wrapper around [`Stockroom`].
///
/// Cloning is cheap and every clone shares the same store.
#[derive(Clone)]
pub struct AsyncStockroom {
    inner: Arc<Mutex<Stockroom>>,
}

impl AsyncStockroom {
    /// Create a new builder for configuring the async store.
    pub fn builder() -> AsyncStockroomBuilder {
        AsyncStockroomBuilder::default()
    }

    /// Wrap an already opened store.
    pub fn new(store: Stockroom) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run a sync store operation on the blocking thread pool.
    ///
    /// The closure receives a `&Stockroom` and holds the store lock for its
    /// whole duration, so multi-step operations inside it are not interleaved
    /// with other callers.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Stockroom) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = match store.lock() {
                Ok(guard) => guard,
                Err(poisoned) => {
                    let guard = poisoned.into_inner();
                    recover(&guard);
                    store.clear_poison();
                    guard
                }
            };
            f(&guard)
        })
        .await
        .map_err(|e| StockroomError::Internal(format!("Store task failed: {e}")))?
    }
}

/// A previous operation panicked while holding the lock. Any transaction it
/// left open is rolled back so the store is usable again.
fn recover(store: &Stockroom) {
    warn!("Store lock was poisoned by a panicked operation; recovering");
    if let Err(e) = store.connection().raw().execute_batch("ROLLBACK") {
        debug!(error = %e, "No open transaction to roll back");
    }
}

impl fmt::Debug for AsyncStockroom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_lock() {
            Ok(store) => write!(f, "AsyncStockroom({store})"),
            Err(_) => f.write_str("AsyncStockroom(<busy>)"),
        }
    }
}
