//! Property-Based Tests for Catalog Module
//!
//! Uses proptest to check listing and create invariants over arbitrary
//! collections.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{query, CatalogService, Item, ItemDraft, ListParams, MemoryStore};
use crate::error::CatalogError;

// == Strategies ==
/// Generates items with small vocabularies so searches actually hit
fn item_strategy() -> impl Strategy<Value = (String, String, f64)> {
    (
        "(Laptop|Chair|Phone|Desk|Lamp) [a-z]{0,4}",
        "(Electronics|Furniture|Lighting|Office)",
        1.0f64..5000.0,
    )
}

fn collection_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(item_strategy(), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, category, price))| Item::new(i as i64 + 1, name, category, price))
            .collect()
    })
}

fn term_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of("(lap|CHAIR|elec|Furn|o|xyz|)")
}

fn service_over(items: Vec<Item>) -> (Arc<MemoryStore>, CatalogService) {
    let store = Arc::new(MemoryStore::new(items));
    let service = CatalogService::new(store.clone(), Duration::from_secs(300));
    (store, service)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // A page never holds more than `limit` items and `total` counts every
    // match regardless of which page was asked for.
    #[test]
    fn prop_page_bounded_and_total_stable(
        items in collection_strategy(),
        term in term_strategy(),
        page in 1usize..8,
        limit in 1usize..12,
    ) {
        let expected_total = query::search(items.clone(), term.as_deref()).len();
        let (_, service) = service_over(items);

        let result = service.list(&ListParams::new(term, page, limit)).unwrap();
        prop_assert!(result.items.len() <= limit);
        prop_assert_eq!(result.pagination.total, expected_total);
        prop_assert_eq!(result.pagination.total_pages, expected_total.div_ceil(limit));
    }

    // Walking every page yields exactly the filtered collection, in order.
    #[test]
    fn prop_pages_concatenate_to_matches(
        items in collection_strategy(),
        term in term_strategy(),
        limit in 1usize..7,
    ) {
        let expected = query::search(items.clone(), term.as_deref());
        let total_pages = expected.len().div_ceil(limit);

        let mut walked = Vec::new();
        for page in 1..=total_pages {
            walked.extend(query::paginate(expected.clone(), page, limit).items);
        }
        prop_assert_eq!(walked, expected);
    }

    // An empty term matches the whole collection.
    #[test]
    fn prop_empty_term_total_is_collection_size(items in collection_strategy()) {
        let size = items.len();
        let (_, service) = service_over(items);

        let result = service.list(&ListParams::new(Some(String::new()), 1, 10)).unwrap();
        prop_assert_eq!(result.pagination.total, size);
    }

    // Search ignores case.
    #[test]
    fn prop_search_case_insensitive(items in collection_strategy(), term in "[a-zA-Z]{1,4}") {
        let upper = query::search(items.clone(), Some(term.to_uppercase().as_str()));
        let lower = query::search(items, Some(term.to_lowercase().as_str()));
        prop_assert_eq!(upper, lower);
    }

    // Created items read back equal to what was submitted.
    #[test]
    fn prop_create_then_get(
        items in collection_strategy(),
        (name, category, price) in item_strategy(),
    ) {
        let (_, service) = service_over(items);

        let created = service
            .create(&ItemDraft::new(name.clone(), category.clone(), price))
            .unwrap();
        let fetched = service.get(created.id).unwrap();
        prop_assert_eq!(&fetched.name, &name);
        prop_assert_eq!(&fetched.category, &category);
        prop_assert_eq!(fetched.price, price);
        prop_assert_eq!(fetched, created);
    }

    // Non-positive prices are always rejected and leave the store untouched.
    #[test]
    fn prop_invalid_price_never_mutates(
        items in collection_strategy(),
        price in -1000.0f64..=0.0,
    ) {
        let size = items.len();
        let (store, service) = service_over(items);

        let result = service.create(&ItemDraft::new("Desk", "Furniture", price));
        prop_assert!(matches!(result, Err(CatalogError::InvalidPayload(_))));
        prop_assert_eq!(store.len(), size);
    }
}
