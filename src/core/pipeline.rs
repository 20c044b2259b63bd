//! # Display Pipeline
//!
//! Pure derivation of the visible country list:
//!
//! ```text
//! full list → search → region filter → sort → limit → displayed
//! ```
//!
//! No caching. The caller re-runs [`apply`] whenever any input changes; with a
//! few hundred countries a full recompute is cheaper than tracking deltas.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Country;

/// Upper bound of the display limit slider.
pub const MAX_LIMIT: u16 = 250;

/// Initial number of countries shown.
pub const DEFAULT_LIMIT: u16 = 40;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Population,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Name => SortKey::Population,
            SortKey::Population => SortKey::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Population => "population",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Orients an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Asc => "↑",
            SortOrder::Desc => "↓",
        }
    }
}

/// Everything the pipeline needs besides the country list itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayQuery {
    pub search_term: String,
    /// Empty means no region filter.
    pub region_filter: String,
    pub sort_key: SortKey,
    pub sort_order: SortOrder,
    pub limit: u16,
}

impl Default for DisplayQuery {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            region_filter: String::new(),
            sort_key: SortKey::default(),
            sort_order: SortOrder::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl DisplayQuery {
    /// Sets the limit, clamped to `[0, MAX_LIMIT]`.
    pub fn set_limit(&mut self, limit: u16) {
        self.limit = limit.min(MAX_LIMIT);
    }
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Ascending comparison of two countries on the given key.
pub fn compare_countries(a: &Country, b: &Country, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.common_name.cmp(&b.common_name),
        SortKey::Population => a.population.cmp(&b.population),
    }
}

/// Runs search → region filter → sort → limit over `countries`.
///
/// The sort is stable: countries with equal keys keep their original relative
/// order in both directions.
pub fn apply(countries: &[Country], query: &DisplayQuery) -> Vec<Country> {
    let mut filtered: Vec<Country> = countries
        .iter()
        .filter(|c| contains_ignore_case(&c.common_name, &query.search_term))
        .filter(|c| query.region_filter.is_empty() || c.region == query.region_filter)
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        query
            .sort_order
            .apply(compare_countries(a, b, query.sort_key))
    });

    filtered.truncate(query.limit as usize);
    filtered
}

/// Distinct non-empty regions, lexicographically sorted.
pub fn derive_regions(countries: &[Country]) -> Vec<String> {
    countries
        .iter()
        .filter(|c| !c.region.is_empty())
        .map(|c| c.region.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
