//! Tests for the Connection wrapper: schema setup, execution and transactions.

use duckdb::types::Value;
use stockroom::{Connection, StockroomError};

fn product_count(conn: &Connection) -> i64 {
    conn.execute_scalar("SELECT COUNT(*) FROM products", &[])
        .unwrap()
        .and_then(|v| v.as_i64())
        .unwrap()
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

#[test]
fn in_memory_connection_creates_all_tables() {
    let conn = Connection::open_in_memory().unwrap();
    for table in ["products", "purchases", "returns"] {
        let count = conn
            .execute_scalar(&format!("SELECT COUNT(*) FROM {table}"), &[])
            .unwrap();
        assert_eq!(count, Some(serde_json::json!(0)), "table {table}");
    }
    assert_eq!(conn.location(), ":memory:");
}

#[test]
fn file_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("stockroom.duckdb");

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_write(
            "INSERT INTO products (id, title, category, price, size, colors, image, inStock, \
             quantity, createdAt, updatedAt) VALUES (?, ?, 'men', 1.0, '[\"M\"]', '[\"Red\"]', \
             '[\"u\"]', true, 1, '2026-01-01T00:00:00.000000Z', '2026-01-01T00:00:00.000000Z')",
            &[Value::Text("p1".into()), Value::Text("Tee".into())],
        )
        .unwrap();
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(product_count(&conn), 1);
    assert_eq!(conn.location(), path.display().to_string());
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

#[test]
fn execute_decodes_json_array_columns() {
    let conn = Connection::open_in_memory().unwrap();
    let rows = conn
        .execute(
            "SELECT '[\"S\",\"M\"]' AS size, '[\"x\"]' AS other",
            &[],
        )
        .unwrap();
    assert_eq!(rows[0]["size"], serde_json::json!(["S", "M"]));
    assert_eq!(rows[0]["other"], serde_json::json!("[\"x\"]"));
}

#[test]
fn execute_scalar_on_empty_result_is_none() {
    let conn = Connection::open_in_memory().unwrap();
    let value = conn
        .execute_scalar("SELECT id FROM products WHERE id = ?", &[Value::Text("nope".into())])
        .unwrap();
    assert!(value.is_none());
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

const INSERT: &str = "INSERT INTO products (id, title, category, price, size, colors, image, \
    inStock, quantity, createdAt, updatedAt) VALUES (?, ?, 'men', 1.0, '[\"M\"]', '[\"Red\"]', \
    '[\"u\"]', true, 1, '2026-01-01T00:00:00.000000Z', '2026-01-01T00:00:00.000000Z')";

#[test]
fn transaction_commits_on_ok() {
    let conn = Connection::open_in_memory().unwrap();
    conn.transaction(|c| {
        c.execute_write(INSERT, &[Value::Text("p1".into()), Value::Text("Tee".into())])?;
        Ok(())
    })
    .unwrap();
    assert_eq!(product_count(&conn), 1);
}

#[test]
fn transaction_rolls_back_on_error() {
    let conn = Connection::open_in_memory().unwrap();
    let result: stockroom::Result<()> = conn.transaction(|c| {
        c.execute_write(INSERT, &[Value::Text("p1".into()), Value::Text("Tee".into())])?;
        Err(StockroomError::Validation("boom".into()))
    });

    assert!(matches!(result, Err(StockroomError::Validation(_))));
    assert_eq!(product_count(&conn), 0);

    // The connection is usable again after the rollback
    conn.execute_write(INSERT, &[Value::Text("p2".into()), Value::Text("Cap".into())])
        .unwrap();
    assert_eq!(product_count(&conn), 1);
}
