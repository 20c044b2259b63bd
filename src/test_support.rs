//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::catalog::{Country, CountrySource, SourceError};
use crate::core::action::{Action, update};
use crate::core::favorites::FavoritesStore;
use crate::core::state::App;

/// Builds a country with no capital and no flag.
pub fn country(code: &str, name: &str, region: &str, population: u64) -> Country {
    Country {
        code: code.to_string(),
        common_name: name.to_string(),
        population,
        region: region.to_string(),
        capitals: Vec::new(),
        flag_image_url: String::new(),
    }
}

fn with_capital(mut c: Country, capital: &str) -> Country {
    c.capitals = vec![capital.to_string()];
    c
}

/// France, Germany, Nigeria, Egypt, Japan, in that order.
pub fn sample_countries() -> Vec<Country> {
    vec![
        with_capital(country("FRA", "France", "Europe", 67391582), "Paris"),
        with_capital(country("DEU", "Germany", "Europe", 83240525), "Berlin"),
        with_capital(country("NGA", "Nigeria", "Africa", 218541212), "Abuja"),
        with_capital(country("EGY", "Egypt", "Africa", 104258327), "Cairo"),
        with_capital(country("JPN", "Japan", "Asia", 125836021), "Tokyo"),
    ]
}

/// A source that always returns the same list.
pub struct StaticSource(pub Vec<Country>);

#[async_trait]
impl CountrySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        Ok(self.0.clone())
    }
}

/// A source that always fails with a network error.
pub struct FailingSource;

#[async_trait]
impl CountrySource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError> {
        Err(SourceError::Network("connection refused".to_string()))
    }
}

/// Creates a test App with in-memory favorites, still loading.
pub fn test_app() -> App {
    App::new(FavoritesStore::in_memory())
}

/// Creates a test App that has already received `sample_countries()`.
pub fn loaded_app() -> App {
    let mut app = test_app();
    update(&mut app, Action::CountriesLoaded(sample_countries()));
    app
}
