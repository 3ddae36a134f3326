//! Local search over cached collections.
//!
//! Queries never reach the backend; they only narrow what a view shows.

use super::model::Searchable;

/// Returns true when any display field contains `query`, ignoring case.
///
/// An empty query matches everything. Whitespace is part of the query.
pub fn matches_query<T: Searchable>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filters a collection by `query`, preserving order.
pub fn filter_by_query<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    items
        .iter()
        .filter(|item| matches_query(*item, query))
        .cloned()
        .collect()
}
