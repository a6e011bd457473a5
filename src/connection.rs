//! DuckDB connection wrapper with schema setup, query execution and
//! transactions.
//!
//! Array fields (`size`, `colors`, `image`) are stored as JSON text and
//! decoded back into JSON arrays when rows are read, so callers always see
//! the document shape of a record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use duckdb::types::{Value, ValueRef};
use duckdb::Connection as DuckDbConnection;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::{schema_statements, JSON_COLUMNS};
use crate::error::Result;

/// Wraps a DuckDB connection holding the `products`, `purchases` and
/// `returns` tables.
pub struct Connection {
    conn: DuckDbConnection,
    path: Option<PathBuf>,
}

impl Connection {
    /// Open (or create) a file-backed database and ensure the schema exists.
    ///
    /// Missing parent directories are created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = DuckDbConnection::open(&path)?;
        let connection = Self {
            conn,
            path: Some(path),
        };
        connection.ensure_schema()?;
        info!(path = %connection.location(), "Opened database");
        Ok(connection)
    }

    /// Open an in-memory database. Data is lost when the connection drops.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        let connection = Self { conn, path: None };
        connection.ensure_schema()?;
        debug!("Opened in-memory database");
        Ok(connection)
    }

    /// Human-readable location of the database (`:memory:` when in-memory).
    pub fn location(&self) -> String {
        match &self.path {
            Some(p) => p.display().to_string(),
            None => ":memory:".to_string(),
        }
    }

    fn ensure_schema(&self) -> Result<()> {
        for statement in schema_statements() {
            self.conn.execute_batch(&statement)?;
        }
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    /// Text in the JSON array columns is parsed back into JSON.
    pub fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has executed
        let column_names: Vec<String> = rows_result
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), decode_json_column(col_name, value));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[Value]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Execute an INSERT, UPDATE or DELETE and return the number of affected rows.
    pub fn execute_write(&self, sql: &str, params: &[Value]) -> Result<usize> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();
        Ok(stmt.execute(param_values.as_slice())?)
    }

    /// Run `f` inside a database transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back otherwise. The error from
    /// `f` is returned even if the rollback itself fails.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        self.conn.execute_batch("BEGIN TRANSACTION")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                    warn!(error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

fn decode_json_column(column: &str, value: serde_json::Value) -> serde_json::Value {
    if !JSON_COLUMNS.contains(&column) {
        return value;
    }
    match value {
        serde_json::Value::String(text) => {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        }
        other => other,
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // HugeInt may not fit in i64
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        // The schema only uses the types above
        _ => serde_json::Value::Null,
    }
}
