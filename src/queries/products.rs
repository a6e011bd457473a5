//! Product catalog queries.

use duckdb::types::Value;
use tracing::{debug, info};

use super::{count_of, json_text, new_id, text};
use crate::config::{PAGE_SIZE, PRODUCTS_TABLE, PRODUCT_COLUMNS};
use crate::connection::Connection;
use crate::error::{Result, StockroomError};
use crate::models::{
    format_timestamp, normalize_page, now, page_offset, Category, NewProduct, Page, Product,
    ProductInput, ProductPatch,
};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// ProductFilter
// ---------------------------------------------------------------------------

/// Optional server-side filters for the product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    pub category: Option<Category>,
}

impl ProductFilter {
    fn apply(&self, qb: &mut SqlBuilder) {
        if let Some(search) = self.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                qb.where_contains_any(&["title"], search);
            }
        }
        if let Some(category) = self.category {
            qb.where_eq("category", text(category.as_str()));
        }
    }
}

// ---------------------------------------------------------------------------
// ProductQuery
// ---------------------------------------------------------------------------

/// Query interface for the product catalog.
pub struct ProductQuery<'a> {
    conn: &'a Connection,
}

impl<'a> ProductQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Validate and insert a new product.
    ///
    /// Fails with [`StockroomError::Validation`] on missing or invalid fields
    /// and [`StockroomError::Conflict`] if the title is taken.
    pub fn add(&self, input: ProductInput) -> Result<Product> {
        let fields = input.into_new_product()?;

        if self.get_by_title(&fields.title)?.is_some() {
            return Err(title_conflict());
        }

        let created = now();
        let product = product_from(new_id(), fields, created, created);

        self.conn.execute_write(
            &format!(
                "INSERT INTO {PRODUCTS_TABLE} ({PRODUCT_COLUMNS}) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            ),
            &[
                text(product.id.as_str()),
                text(product.title.as_str()),
                text(product.category.as_str()),
                Value::Double(product.price),
                json_text(&product.size)?,
                json_text(&product.colors)?,
                json_text(&product.image)?,
                Value::Boolean(product.in_stock),
                Value::BigInt(product.quantity),
                text(format_timestamp(&product.created_at)),
                text(format_timestamp(&product.updated_at)),
            ],
        )?;

        info!(id = %product.id, title = %product.title, "Product added");
        Ok(product)
    }

    /// One page of products, newest first.
    pub fn list(&self, page: usize, filter: &ProductFilter) -> Result<Page<Product>> {
        let page = normalize_page(page);

        let mut count_qb = SqlBuilder::new(PRODUCTS_TABLE);
        count_qb.select(&["COUNT(*) AS cnt"]);
        filter.apply(&mut count_qb);
        let (sql, params) = count_qb.build();
        let total = count_of(self.conn.execute_scalar(&sql, &params)?.as_ref());

        let offset = page_offset(page);
        if offset >= total {
            debug!(page, total, "Requested page is past the end");
            return Ok(Page::new(Vec::new(), page, total));
        }

        let mut qb = SqlBuilder::new(PRODUCTS_TABLE);
        qb.select(&[PRODUCT_COLUMNS]);
        filter.apply(&mut qb);
        qb.order_by(&["createdAt DESC", "seq DESC"])
            .limit(PAGE_SIZE)
            .offset(offset);

        let (sql, params) = qb.build();
        let items: Vec<Product> = self.conn.execute_into(&sql, &params)?;
        debug!(page, total, returned = items.len(), "Listed products");

        Ok(Page::new(items, page, total))
    }

    /// Fetch a product by id.
    pub fn get(&self, id: &str) -> Result<Product> {
        self.find_one("id", id)?
            .ok_or_else(|| StockroomError::NotFound("Product not found".into()))
    }

    /// Fetch a product by its exact title.
    pub fn get_by_title(&self, title: &str) -> Result<Option<Product>> {
        self.find_one("title", title)
    }

    /// Merge `patch` into the product with `id` and persist the result.
    pub fn update(&self, id: &str, patch: ProductPatch) -> Result<Product> {
        let current = self.get(id)?;
        let fields = patch.apply(&current)?;

        if fields.title != current.title {
            let (sql, params) = SqlBuilder::new(PRODUCTS_TABLE)
                .select(&["id"])
                .where_eq("title", text(fields.title.as_str()))
                .where_ne("id", text(id))
                .limit(1)
                .build();
            if !self.conn.execute(&sql, &params)?.is_empty() {
                return Err(title_conflict());
            }
        }

        let product = product_from(current.id, fields, current.created_at, now());

        self.conn.execute_write(
            &format!(
                "UPDATE {PRODUCTS_TABLE} SET title = ?, category = ?, price = ?, size = ?, \
                 colors = ?, image = ?, inStock = ?, quantity = ?, updatedAt = ? WHERE id = ?"
            ),
            &[
                text(product.title.as_str()),
                text(product.category.as_str()),
                Value::Double(product.price),
                json_text(&product.size)?,
                json_text(&product.colors)?,
                json_text(&product.image)?,
                Value::Boolean(product.in_stock),
                Value::BigInt(product.quantity),
                text(format_timestamp(&product.updated_at)),
                text(product.id.as_str()),
            ],
        )?;

        info!(id = %product.id, "Product updated");
        Ok(product)
    }

    /// Delete the product with `title` and return it.
    pub fn delete_by_title(&self, title: &str) -> Result<Product> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StockroomError::Validation("Title is required".into()));
        }

        let product = self
            .get_by_title(title)?
            .ok_or_else(|| StockroomError::NotFound("Product not found".into()))?;

        self.conn.execute_write(
            &format!("DELETE FROM {PRODUCTS_TABLE} WHERE id = ?"),
            &[text(product.id.as_str())],
        )?;

        info!(id = %product.id, title = %product.title, "Product deleted");
        Ok(product)
    }

    /// Count all products.
    pub fn count(&self) -> Result<usize> {
        let (sql, params) = SqlBuilder::new(PRODUCTS_TABLE)
            .select(&["COUNT(*) AS cnt"])
            .build();
        Ok(count_of(self.conn.execute_scalar(&sql, &params)?.as_ref()))
    }

    /// Add `delta` (possibly negative) to a product's stock.
    pub(crate) fn adjust_stock(&self, id: &str, delta: i64) -> Result<()> {
        let changed = self.conn.execute_write(
            &format!(
                "UPDATE {PRODUCTS_TABLE} SET quantity = quantity + ?, updatedAt = ? WHERE id = ?"
            ),
            &[
                Value::BigInt(delta),
                text(format_timestamp(&now())),
                text(id),
            ],
        )?;
        if changed == 0 {
            return Err(StockroomError::NotFound("Product not found".into()));
        }
        Ok(())
    }

    fn find_one(&self, column: &str, value: &str) -> Result<Option<Product>> {
        let (sql, params) = SqlBuilder::new(PRODUCTS_TABLE)
            .select(&[PRODUCT_COLUMNS])
            .where_eq(column, text(value))
            .limit(1)
            .build();
        let rows: Vec<Product> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn product_from(
    id: String,
    fields: NewProduct,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> Product {
    Product {
        id,
        title: fields.title,
        category: fields.category,
        price: fields.price,
        size: fields.size,
        colors: fields.colors,
        image: fields.image,
        in_stock: fields.in_stock,
        quantity: fields.quantity,
        created_at,
        updated_at,
    }
}

fn title_conflict() -> StockroomError {
    StockroomError::Conflict("Product with this title already exists.".into())
}
