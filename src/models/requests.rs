//! Request DTOs for the catalog server API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

use crate::catalog::{ListParams, DEFAULT_LIMIT, DEFAULT_PAGE};

pub use crate::catalog::ItemDraft as CreateItemRequest;

/// Query string for the listing endpoint (GET /api/items)
///
/// # Fields
/// - `q`: Optional free-text search term
/// - `page`: 1-based page number
/// - `limit`: Page size
///
/// Numbers are taken as raw strings so that garbage falls back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl ListQuery {
    /// Converts into normalized listing parameters.
    pub fn into_params(self) -> ListParams {
        ListParams::new(
            self.q,
            parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT),
        )
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let params = ListQuery::default().into_params();
        assert_eq!(params, ListParams::default());
    }

    #[test]
    fn test_list_query_parses_numbers() {
        let query = ListQuery {
            q: Some("laptop".to_string()),
            page: Some("2".to_string()),
            limit: Some("5".to_string()),
        };
        let params = query.into_params();
        assert_eq!(params.term.as_deref(), Some("laptop"));
        assert_eq!(params.page, 2);
        assert_eq!(params.limit, 5);
    }

    #[test]
    fn test_list_query_garbage_falls_back() {
        let query = ListQuery {
            q: None,
            page: Some("abc".to_string()),
            limit: Some("0".to_string()),
        };
        let params = query.into_params();
        assert_eq!(params.page, DEFAULT_PAGE);
        assert_eq!(params.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{"name": "Lamp", "category": "Lighting", "price": 25.5}"#;
        let req: CreateItemRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name.as_deref(), Some("Lamp"));
        assert!(req.validate().is_ok());
    }
}
