use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StockroomError};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Both,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Men, Category::Women, Category::Both];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
            Category::Both => "both",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = StockroomError;

    /// Surrounding whitespace is ignored; matching is exact otherwise.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == trimmed)
            .ok_or_else(|| {
                StockroomError::Validation(format!(
                    "`{trimmed}` is not a valid category (expected men, women or both)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    S,
    M,
    L,
    XL,
    XXL,
    XXXL,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::S, Size::M, Size::L, Size::XL, Size::XXL, Size::XXXL];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
            Size::XXXL => "XXXL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = StockroomError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Size::ALL
            .into_iter()
            .find(|size| size.as_str() == trimmed)
            .ok_or_else(|| {
                StockroomError::Validation(format!(
                    "`{trimmed}` is not a valid size (expected S, M, L, XL, XXL or XXXL)"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// ListInput — array or comma-separated string
// ---------------------------------------------------------------------------

/// A list field as submitted by a client: either a JSON array or a single
/// comma-separated string such as `"Red, Blue"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Many(Vec<String>),
    Csv(String),
}

impl ListInput {
    /// Trimmed entries with blanks dropped.
    pub fn into_vec(self) -> Vec<String> {
        let raw = match self {
            ListInput::Many(items) => items,
            ListInput::Csv(text) => text.split(',').map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

impl From<Vec<String>> for ListInput {
    fn from(items: Vec<String>) -> Self {
        ListInput::Many(items)
    }
}

impl From<&str> for ListInput {
    fn from(text: &str) -> Self {
        ListInput::Csv(text.to_string())
    }
}

// ---------------------------------------------------------------------------
// Product — stored catalog entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub price: f64,
    pub size: Vec<Size>,
    pub colors: Vec<String>,
    pub image: Vec<String>,
    pub in_stock: bool,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// NewProduct — a validated field set ready to be written
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub title: String,
    pub category: Category,
    pub price: f64,
    pub size: Vec<Size>,
    pub colors: Vec<String>,
    pub image: Vec<String>,
    pub in_stock: bool,
    pub quantity: i64,
}

impl NewProduct {
    /// Check the value constraints that typing alone does not capture.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.title.trim().is_empty() {
            problems.push("title must not be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            problems.push("price must be a non-negative number".to_string());
        }
        if self.size.is_empty() {
            problems.push("size must list at least one size".to_string());
        }
        if self.colors.is_empty() || self.colors.iter().any(|c| c.trim().is_empty()) {
            problems.push("colors must list at least one non-empty color".to_string());
        }
        if self.image.is_empty() || self.image.iter().any(|u| u.trim().is_empty()) {
            problems.push("image must list at least one non-empty URL".to_string());
        }
        if self.quantity < 0 {
            problems.push("quantity must not be negative".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(StockroomError::Validation(problems.join("; ")))
        }
    }
}

// ---------------------------------------------------------------------------
// ProductInput — create request
// ---------------------------------------------------------------------------

/// Raw fields of an add-product request. Every field is optional here so
/// that missing fields can be reported by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub size: Option<ListInput>,
    pub colors: Option<ListInput>,
    pub image: Option<ListInput>,
    pub in_stock: Option<bool>,
    pub quantity: Option<i64>,
}

impl ProductInput {
    /// Check presence of every field, parse enums and validate constraints.
    pub fn into_new_product(self) -> Result<NewProduct> {
        let mut missing = Vec::new();
        if self.title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            missing.push("title");
        }
        if self.category.as_deref().map_or(true, |c| c.trim().is_empty()) {
            missing.push("category");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        let size = self.size.map(ListInput::into_vec).unwrap_or_default();
        if size.is_empty() {
            missing.push("size");
        }
        let colors = self.colors.map(ListInput::into_vec).unwrap_or_default();
        if colors.is_empty() {
            missing.push("colors");
        }
        let image = self.image.map(ListInput::into_vec).unwrap_or_default();
        if image.is_empty() {
            missing.push("image");
        }
        if self.in_stock.is_none() {
            missing.push("inStock");
        }
        if self.quantity.is_none() {
            missing.push("quantity");
        }
        if !missing.is_empty() {
            return Err(missing_fields(&missing));
        }

        let product = NewProduct {
            title: self.title.unwrap_or_default().trim().to_string(),
            category: self.category.unwrap_or_default().parse()?,
            price: self.price.unwrap_or_default(),
            size: parse_sizes(&size)?,
            colors,
            image,
            in_stock: self.in_stock.unwrap_or_default(),
            quantity: self.quantity.unwrap_or_default(),
        };
        product.validate()?;
        Ok(product)
    }
}

// ---------------------------------------------------------------------------
// ProductPatch — partial update request
// ---------------------------------------------------------------------------

/// Partial update: only the fields present are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub size: Option<ListInput>,
    pub colors: Option<ListInput>,
    pub image: Option<ListInput>,
    pub in_stock: Option<bool>,
    pub quantity: Option<i64>,
}

impl ProductPatch {
    /// Merge into `current` and validate the merged record.
    ///
    /// A field sent as an empty list clears it, which then fails validation.
    pub fn apply(self, current: &Product) -> Result<NewProduct> {
        let size = match self.size {
            Some(list) => parse_sizes(&list.into_vec())?,
            None => current.size.clone(),
        };
        let category = match self.category {
            Some(c) => c.parse()?,
            None => current.category,
        };

        let merged = NewProduct {
            title: self
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or_else(|| current.title.clone()),
            category,
            price: self.price.unwrap_or(current.price),
            size,
            colors: self
                .colors
                .map(ListInput::into_vec)
                .unwrap_or_else(|| current.colors.clone()),
            image: self
                .image
                .map(ListInput::into_vec)
                .unwrap_or_else(|| current.image.clone()),
            in_stock: self.in_stock.unwrap_or(current.in_stock),
            quantity: self.quantity.unwrap_or(current.quantity),
        };
        merged.validate()?;
        Ok(merged)
    }
}

pub(crate) fn parse_sizes(raw: &[String]) -> Result<Vec<Size>> {
    raw.iter().map(|s| s.parse()).collect()
}

pub(crate) fn missing_fields(fields: &[&str]) -> StockroomError {
    StockroomError::Validation(format!("Missing required fields: {}", fields.join(", ")))
}
