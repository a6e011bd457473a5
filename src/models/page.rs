use serde::{Deserialize, Serialize};

use crate::config::PAGE_SIZE;

// ---------------------------------------------------------------------------
// Page — one fixed-size slice of a list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was served.
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: usize, total_count: usize) -> Self {
        Self {
            items,
            page,
            total_pages: total_pages(total_count),
            total_count,
        }
    }
}

/// `ceil(total_count / PAGE_SIZE)`; zero records means zero pages.
pub fn total_pages(total_count: usize) -> usize {
    total_count.div_ceil(PAGE_SIZE)
}

/// Clamp a requested page number to 1 or more.
pub fn normalize_page(page: usize) -> usize {
    page.max(1)
}

/// Largest offset DuckDB accepts (`OFFSET` is a BIGINT).
const MAX_OFFSET: usize = i64::MAX as usize;

/// Rows to skip for a (normalized) page number, capped at [`MAX_OFFSET`].
pub fn page_offset(page: usize) -> usize {
    (normalize_page(page) - 1)
        .saturating_mul(PAGE_SIZE)
        .min(MAX_OFFSET)
}

// ---------------------------------------------------------------------------
// LedgerPage — page of ledger entries plus the money they represent
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPage<T> {
    #[serde(flatten)]
    pub page: Page<T>,
    /// Sum of `price` across every entry matching the filter, not only this page.
    pub total_amount: f64,
}
