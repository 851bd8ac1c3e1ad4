//! Catalog Statistics Module
//!
//! Computes summary statistics over an item collection in a single pass.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::catalog::Item;

// == Catalog Stats ==
/// Aggregate figures over the whole collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    /// Number of items
    pub total: usize,
    /// Mean price rounded to 2 decimal places
    pub average_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    /// Number of distinct categories
    pub categories: usize,
    /// Item count per category
    pub category_breakdown: BTreeMap<String, usize>,
}

impl CatalogStats {
    // == Constructor ==
    /// Creates all-zero stats, the value for an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    // == Compute ==
    /// Aggregates `items` in one pass.
    ///
    /// An empty slice yields the all-zero value; no division happens.
    pub fn compute(items: &[Item]) -> Self {
        if items.is_empty() {
            return Self::new();
        }

        let mut sum = 0.0;
        let mut max_price = f64::MIN;
        let mut min_price = f64::MAX;
        let mut category_breakdown = BTreeMap::new();

        for item in items {
            sum += item.price;
            max_price = max_price.max(item.price);
            min_price = min_price.min(item.price);
            *category_breakdown.entry(item.category.clone()).or_insert(0) += 1;
        }

        Self {
            total: items.len(),
            average_price: round_cents(sum / items.len() as f64),
            max_price,
            min_price,
            categories: category_breakdown.len(),
            category_breakdown,
        }
    }
}

/// Rounds to 2 decimal places, halves away from zero.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
