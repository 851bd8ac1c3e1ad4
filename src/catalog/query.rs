//! Query Engine Module
//!
//! Free-text search, pagination and id lookup over an item collection.

use serde::Serialize;

use crate::catalog::Item;

// == Defaults ==
/// Page used when none (or an invalid one) is supplied
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when none (or an invalid one) is supplied
pub const DEFAULT_LIMIT: usize = 10;

// == List Params ==
/// Normalized listing parameters. `page` and `limit` are always >= 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub term: Option<String>,
    pub page: usize,
    pub limit: usize,
}

impl ListParams {
    /// Builds params, replacing zero page/limit with the defaults.
    pub fn new(term: Option<String>, page: usize, limit: usize) -> Self {
        Self {
            term,
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }

    pub fn with_term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Self::default()
        }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            term: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

// == Page Result ==
/// Pagination metadata for a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    /// Number of matches before slicing
    pub total: usize,
    pub total_pages: usize,
}

/// One page of matching items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub items: Vec<Item>,
    pub pagination: Pagination,
}

// == Search ==
/// Keeps items whose name or category contains `term`, ignoring case.
///
/// An absent or blank term keeps everything. Order is preserved.
pub fn search(items: Vec<Item>, term: Option<&str>) -> Vec<Item> {
    let needle = match term.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) => t.to_lowercase(),
        None => return items,
    };

    items
        .into_iter()
        .filter(|item| {
            item.name.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle)
        })
        .collect()
}

// == Paginate ==
/// Slices `filtered` to the requested page.
///
/// A start index past the end yields an empty page, not an error.
pub fn paginate(filtered: Vec<Item>, page: usize, limit: usize) -> Page {
    let page = page.max(1);
    let limit = limit.max(1);
    let total = filtered.len();

    let start = (page - 1).saturating_mul(limit);
    let items = filtered.into_iter().skip(start).take(limit).collect();

    Page {
        items,
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        },
    }
}

// == Find By Id ==
/// Exact id lookup.
pub fn find_by_id(items: &[Item], id: i64) -> Option<&Item> {
    items.iter().find(|item| item.id == id)
}

/// Parses a raw path id. Anything that is not an integer yields `None`,
/// which callers treat exactly like a missing item.
pub fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
