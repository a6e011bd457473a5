use std::sync::Arc;

use stockroom::AsyncStockroom;
use tracing::info;

use crate::config::Config;

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// The store. Dispatches blocking DuckDB work to a thread pool and
    /// applies operations one at a time.
    pub store: AsyncStockroom,

    pub config: Config,
}

impl AppState {
    pub async fn new(config: Config) -> stockroom::Result<Arc<Self>> {
        let store = AsyncStockroom::builder()
            .storage(config.storage.clone())
            .return_policy(config.return_policy)
            .build()
            .await?;
        info!(?store, "Store ready");

        Ok(Arc::new(Self { store, config }))
    }
}
