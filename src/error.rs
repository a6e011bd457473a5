#[derive(Debug, thiserror::Error)]
pub enum StockroomError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Insufficient product stock for '{title}': requested {requested}, available {available}")]
    InsufficientStock {
        title: String,
        requested: i64,
        available: i64,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A store operation panicked or its worker task failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, StockroomError>;
