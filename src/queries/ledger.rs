//! Storage shared by the purchase and return ledgers.
//!
//! Both tables have the same columns, so inserts, lookups and paging are
//! written once here and parameterized by table name.

use duckdb::types::Value;

use super::{count_of, json_text, text};
use crate::config::{LEDGER_COLUMNS, PAGE_SIZE};
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{format_timestamp, normalize_page, page_offset, LedgerEntry, LedgerPage, Page};
use crate::sql_builder::SqlBuilder;

/// Columns a ledger search looks at.
const SEARCH_COLUMNS: &[&str] = &["\"Name\"", "\"Number\"", "title"];

/// Optional server-side filter for ledger lists.
#[derive(Debug, Clone, Default)]
pub struct LedgerFilter {
    /// Case-insensitive substring of the buyer name, buyer number or title.
    pub search: Option<String>,
}

impl LedgerFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
        }
    }

    fn apply(&self, qb: &mut SqlBuilder) {
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                qb.where_contains_any(SEARCH_COLUMNS, search);
            }
        }
    }
}

pub(crate) fn insert_entry(conn: &Connection, table: &str, entry: &LedgerEntry) -> Result<()> {
    conn.execute_write(
        &format!(
            "INSERT INTO {table} ({LEDGER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        ),
        &[
            text(entry.id.as_str()),
            text(entry.name.as_str()),
            text(entry.number.as_str()),
            text(entry.title.as_str()),
            text(entry.category.as_str()),
            Value::Double(entry.price),
            Value::BigInt(entry.quantity),
            json_text(&entry.size)?,
            json_text(&entry.colors)?,
            json_text(&entry.image)?,
            text(format_timestamp(&entry.date)),
        ],
    )?;
    Ok(())
}

pub(crate) fn get_entry(conn: &Connection, table: &str, id: &str) -> Result<Option<LedgerEntry>> {
    let (sql, params) = SqlBuilder::new(table)
        .select(&[LEDGER_COLUMNS])
        .where_eq("id", text(id))
        .limit(1)
        .build();
    let rows: Vec<LedgerEntry> = conn.execute_into(&sql, &params)?;
    Ok(rows.into_iter().next())
}

pub(crate) fn delete_entry(conn: &Connection, table: &str, id: &str) -> Result<usize> {
    conn.execute_write(&format!("DELETE FROM {table} WHERE id = ?"), &[text(id)])
}

/// One page of entries, most recent `date` first, with the filtered total.
pub(crate) fn list_entries(
    conn: &Connection,
    table: &str,
    page: usize,
    filter: &LedgerFilter,
) -> Result<LedgerPage<LedgerEntry>> {
    let page = normalize_page(page);

    let mut totals_qb = SqlBuilder::new(table);
    totals_qb.select(&["COUNT(*) AS cnt", "COALESCE(SUM(price), 0) AS total"]);
    filter.apply(&mut totals_qb);
    let (sql, params) = totals_qb.build();
    let totals = conn.execute(&sql, &params)?.into_iter().next().unwrap_or_default();
    let total_count = count_of(totals.get("cnt"));
    let total_amount = totals.get("total").and_then(|v| v.as_f64()).unwrap_or(0.0);

    let offset = page_offset(page);
    let items: Vec<LedgerEntry> = if offset >= total_count {
        Vec::new()
    } else {
        let mut qb = SqlBuilder::new(table);
        qb.select(&[LEDGER_COLUMNS]);
        filter.apply(&mut qb);
        qb.order_by(&["\"date\" DESC", "seq DESC"])
            .limit(PAGE_SIZE)
            .offset(offset);

        let (sql, params) = qb.build();
        conn.execute_into(&sql, &params)?
    };

    Ok(LedgerPage {
        page: Page::new(items, page, total_count),
        total_amount,
    })
}

pub(crate) fn count_entries(conn: &Connection, table: &str) -> Result<usize> {
    let (sql, params) = SqlBuilder::new(table)
        .select(&["COUNT(*) AS cnt"])
        .build();
    Ok(count_of(conn.execute_scalar(&sql, &params)?.as_ref()))
}
