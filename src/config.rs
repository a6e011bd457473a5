use std::path::PathBuf;

/// Fixed number of records per page on every list operation.
pub const PAGE_SIZE: usize = 50;

pub const PRODUCTS_TABLE: &str = "products";
pub const PURCHASES_TABLE: &str = "purchases";
pub const RETURNS_TABLE: &str = "returns";

pub const DATABASE_FILE: &str = "stockroom.duckdb";

/// Columns holding JSON arrays serialized as text. Decoded back into JSON
/// arrays when rows are read.
pub const JSON_COLUMNS: &[&str] = &["size", "colors", "image"];

pub const PRODUCT_COLUMNS: &str =
    "id, title, category, price, size, colors, image, inStock, quantity, createdAt, updatedAt";

pub const LEDGER_COLUMNS: &str =
    "id, \"Name\", \"Number\", title, category, price, quantity, size, colors, image, \"date\"";

pub fn schema_statements() -> Vec<String> {
    vec![
        format!("CREATE SEQUENCE IF NOT EXISTS {PRODUCTS_TABLE}_seq"),
        format!(
            "CREATE TABLE IF NOT EXISTS {PRODUCTS_TABLE} (\
                id VARCHAR PRIMARY KEY, \
                seq BIGINT NOT NULL DEFAULT nextval('{PRODUCTS_TABLE}_seq'), \
                title VARCHAR NOT NULL, \
                category VARCHAR NOT NULL, \
                price DOUBLE NOT NULL, \
                size VARCHAR NOT NULL, \
                colors VARCHAR NOT NULL, \
                image VARCHAR NOT NULL, \
                inStock BOOLEAN NOT NULL, \
                quantity BIGINT NOT NULL, \
                createdAt VARCHAR NOT NULL, \
                updatedAt VARCHAR NOT NULL)"
        ),
        format!("CREATE SEQUENCE IF NOT EXISTS {PURCHASES_TABLE}_seq"),
        ledger_table(PURCHASES_TABLE),
        format!("CREATE SEQUENCE IF NOT EXISTS {RETURNS_TABLE}_seq"),
        ledger_table(RETURNS_TABLE),
    ]
}

fn ledger_table(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\
            id VARCHAR PRIMARY KEY, \
            seq BIGINT NOT NULL DEFAULT nextval('{table}_seq'), \
            \"Name\" VARCHAR NOT NULL, \
            \"Number\" VARCHAR NOT NULL, \
            title VARCHAR NOT NULL, \
            category VARCHAR NOT NULL, \
            price DOUBLE NOT NULL, \
            quantity BIGINT NOT NULL, \
            size VARCHAR NOT NULL, \
            colors VARCHAR NOT NULL, \
            image VARCHAR NOT NULL, \
            \"date\" VARCHAR NOT NULL)"
    )
}

pub fn default_database_path() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("stockroom").join(DATABASE_FILE)
    } else {
        PathBuf::from(".stockroom").join(DATABASE_FILE)
    }
}
