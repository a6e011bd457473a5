use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::{missing_fields, Category, ListInput, Size};
use crate::error::{Result, StockroomError};

// ---------------------------------------------------------------------------
// LedgerEntry — a purchase or a return
// ---------------------------------------------------------------------------

/// One line of the consumer ledger. Purchases and returns share this shape;
/// `date` is the time of sale for a purchase and the time of return for a
/// return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Number")]
    pub number: String,
    pub title: String,
    pub category: Category,
    pub price: f64,
    pub quantity: i64,
    pub size: Vec<Size>,
    pub colors: Vec<String>,
    pub image: Vec<String>,
    pub date: DateTime<Utc>,
}

pub type Purchase = LedgerEntry;
pub type ReturnRecord = LedgerEntry;

// ---------------------------------------------------------------------------
// PurchaseInput — purchase registration request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseInput {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Buyer phone number, sent either as a JSON number or a string.
    #[serde(rename = "Number")]
    pub number: Option<serde_json::Value>,
    pub title: Option<String>,
    /// Price recorded on the purchase line.
    #[serde(alias = "totalPrice", alias = "price")]
    pub totalprice: Option<f64>,
    pub quantity: Option<i64>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
    pub image: Option<ListInput>,
}

/// A validated purchase request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub name: String,
    pub number: String,
    pub title: String,
    pub category: Category,
    pub price: f64,
    pub quantity: i64,
    pub size: Size,
    pub color: String,
    pub image: Vec<String>,
}

impl PurchaseInput {
    pub fn into_new_purchase(self) -> Result<NewPurchase> {
        let number = number_text(self.number.as_ref());
        let image = self.image.map(ListInput::into_vec).unwrap_or_default();

        let mut missing = Vec::new();
        if blank(&self.name) {
            missing.push("Name");
        }
        if matches!(number, Ok(None)) {
            missing.push("Number");
        }
        if blank(&self.title) {
            missing.push("title");
        }
        if self.totalprice.is_none() {
            missing.push("totalprice");
        }
        if self.quantity.is_none() {
            missing.push("quantity");
        }
        if blank(&self.size) {
            missing.push("size");
        }
        if blank(&self.color) {
            missing.push("color");
        }
        if blank(&self.category) {
            missing.push("category");
        }
        if image.is_empty() {
            missing.push("image");
        }
        if !missing.is_empty() {
            return Err(missing_fields(&missing));
        }

        let number = number?.unwrap_or_default();

        let price = self.totalprice.unwrap_or_default();
        if !price.is_finite() || price < 0.0 {
            return Err(StockroomError::Validation(
                "totalprice must be a non-negative number".into(),
            ));
        }
        let quantity = self.quantity.unwrap_or_default();
        if quantity < 1 {
            return Err(StockroomError::Validation(
                "quantity must be at least 1".into(),
            ));
        }

        Ok(NewPurchase {
            name: self.name.unwrap_or_default().trim().to_string(),
            number,
            title: self.title.unwrap_or_default().trim().to_string(),
            category: self.category.unwrap_or_default().parse()?,
            price,
            quantity,
            size: self.size.unwrap_or_default().parse()?,
            color: self.color.unwrap_or_default().trim().to_string(),
            image,
        })
    }
}

fn blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Integer JSON numbers and non-blank strings are accepted as a buyer number.
///
/// `Ok(None)` means absent (null or blank); any other value that is not a
/// whole number or a string is a validation error.
fn number_text(value: Option<&serde_json::Value>) -> Result<Option<String>> {
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .map(|u| u.to_string())
            .or_else(|| n.as_i64().map(|i| i.to_string()))
            .map(Some)
            .ok_or_else(|| {
                StockroomError::Validation(format!("Number must be a whole number, got {n}"))
            }),
        Some(_) => Err(StockroomError::Validation(
            "Number must be a phone number string or a whole number".into(),
        )),
    }
}
