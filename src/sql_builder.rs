//! SQL builder with parameterized query construction.
//!
//! All user-supplied values go through DuckDB's parameter binding (`?` placeholders),
//! never through string interpolation. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use stockroom::SqlBuilder;
//! use duckdb::types::Value;
//!
//! let (sql, params) = SqlBuilder::new("products")
//!     .where_eq("category", Value::Text("men".into()))
//!     .where_contains_any(&["title"], "tee")
//!     .order_by(&["createdAt DESC"])
//!     .limit(50)
//!     .build();
//! assert_eq!(params.len(), 2);
//! assert!(sql.ends_with("LIMIT 50"));
//! ```

use duckdb::types::Value;

/// Builds parameterized SQL queries safely.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
    offset_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
            offset_val: None,
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a WHERE condition with `?` placeholders for each param.
    pub fn where_clause(&mut self, condition: &str, params: Vec<Value>) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params);
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: Value) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value);
        self
    }

    /// Add an inequality condition: `{column} <> ?`.
    pub fn where_ne(&mut self, column: &str, value: Value) -> &mut Self {
        self.where_clauses.push(format!("{} <> ?", column));
        self.params.push(value);
        self
    }

    /// Add an OR-combined case-insensitive substring match over several columns.
    ///
    /// Generates: `(contains(LOWER(a), LOWER(?)) OR contains(LOWER(b), LOWER(?)))`.
    /// The needle is matched literally, so `%` and `_` carry no meaning.
    /// An empty column list adds nothing.
    pub fn where_contains_any(&mut self, columns: &[&str], needle: &str) -> &mut Self {
        if columns.is_empty() {
            return self;
        }
        let parts: Vec<String> = columns
            .iter()
            .map(|c| format!("contains(LOWER({}), LOWER(?))", c))
            .collect();
        self.where_clauses.push(format!("({})", parts.join(" OR ")));
        self.params
            .extend(columns.iter().map(|_| Value::Text(needle.to_string())));
        self
    }

    /// Add ORDER BY clauses (e.g. `"title ASC"`, `"price DESC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Set the number of rows to skip before returning results.
    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = Some(n);
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut parts = vec![
            format!("SELECT {}", self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }

        if let Some(n) = self.offset_val {
            parts.push(format!("OFFSET {}", n));
        }

        (parts.join("\n"), self.params.clone())
    }
}
