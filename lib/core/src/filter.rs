//! Client-side filtering of a loaded collection.
//!
//! Recomputed synchronously whenever the search term, the categorical
//! filters, or the loaded collection change. Pure: the same filter over
//! the same collection always yields the same subsequence, and applying
//! a filter to its own output is a no-op.

use std::collections::BTreeMap;

use crate::resource::Resource;

/// A free-text search term plus zero or more categorical filters.
///
/// The search term matches case-insensitively as a substring of any of
/// the resource's searchable fields. Categorical filters are exact-match,
/// AND'ed together and AND'ed with the search predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub search: String,
    pub categorical: BTreeMap<String, String>,
}

impl Filter {
    /// Filter on a search term only.
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            categorical: BTreeMap::new(),
        }
    }

    /// Add a categorical equals-filter.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.categorical.insert(key.into(), value.into());
        self
    }

    /// True when no search term and no categorical filters are set.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.categorical.is_empty()
    }

    /// Whether one record passes this filter.
    pub fn matches<R: Resource>(&self, record: &R) -> bool {
        let term = self.search.trim().to_lowercase();
        if !term.is_empty() {
            let hit = record
                .search_text()
                .iter()
                .any(|text| text.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        self.categorical.iter().all(|(key, expected)| {
            record
                .field(key)
                .is_some_and(|actual| actual == *expected)
        })
    }

    /// The filtered subsequence, preserving collection order.
    pub fn apply<R: Resource>(&self, records: &[R]) -> Vec<R> {
        records
            .iter()
            .filter(|r| self.matches(*r))
            .cloned()
            .collect()
    }
}
