//! Item Module
//!
//! Defines catalog items and the validation applied to create payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CatalogError, Result};

const INVALID_PAYLOAD: &str = "Invalid payload. Required: name, category, and positive price";

// == Item ==
/// A single priced catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier, assigned at creation
    pub id: i64,
    /// Display name
    pub name: String,
    /// Category label
    pub category: String,
    /// Strictly positive price
    pub price: f64,
}

impl Item {
    /// Creates a new item.
    pub fn new(id: i64, name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
        }
    }
}

// == Item Draft ==
/// Unvalidated create payload.
///
/// Fields are loosely typed so that a missing field or a non-numeric price is
/// reported as an invalid payload rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<Value>,
}

impl ItemDraft {
    /// Builds a well-formed draft.
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            category: Some(category.into()),
            price: serde_json::Number::from_f64(price).map(Value::Number),
        }
    }

    // == Validate ==
    /// Checks the draft and returns the validated fields.
    ///
    /// `name` and `category` must be non-empty after trimming; `price` must be a
    /// finite JSON number greater than zero. Values are kept as submitted.
    pub fn validate(&self) -> Result<ValidItem> {
        let name = non_blank(self.name.as_deref());
        let category = non_blank(self.category.as_deref());
        let price = self
            .price
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|p| p.is_finite() && *p > 0.0);

        match (name, category, price) {
            (Some(name), Some(category), Some(price)) => Ok(ValidItem {
                name: name.to_string(),
                category: category.to_string(),
                price,
            }),
            _ => Err(CatalogError::InvalidPayload(INVALID_PAYLOAD.to_string())),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// == Valid Item ==
/// A draft that passed validation and only lacks an id.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidItem {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl ValidItem {
    /// Attaches the assigned id.
    pub fn with_id(self, id: i64) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
        }
    }
}
