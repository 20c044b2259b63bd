//! # Application State
//!
//! Core business state for Atlas. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── countries: Vec<Country>        // full list, set once by the fetch
//! ├── regions: Vec<String>           // distinct sorted regions of `countries`
//! ├── is_loading: bool               // true until the fetch settles
//! ├── error: Option<String>          // fetch failure message
//! ├── query: DisplayQuery            // search / region / sort / limit
//! ├── displayed: Vec<Country>        // pipeline output for `query`
//! ├── favorites: FavoritesStore      // persisted favorites
//! ├── favorites_query: FavoritesQuery
//! ├── page: Page                     // which view is active
//! └── status_message: String         // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::catalog::Country;
use crate::core::config::ResolvedConfig;
use crate::core::favorites::{FavoriteEntry, FavoritesQuery, FavoritesStore};
use crate::core::pipeline::{self, DisplayQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Countries,
    Favorites,
}

impl Page {
    pub fn next(self) -> Self {
        match self {
            Page::Countries => Page::Favorites,
            Page::Favorites => Page::Countries,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Countries => "Countries",
            Page::Favorites => "Favorites",
        }
    }
}

pub struct App {
    pub countries: Vec<Country>,
    pub regions: Vec<String>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub query: DisplayQuery,
    /// Output of the pipeline for the current `query`. Kept in sync by `refresh`.
    pub displayed: Vec<Country>,
    pub favorites: FavoritesStore,
    pub favorites_query: FavoritesQuery,
    pub page: Page,
    pub status_message: String,
}

impl App {
    /// A fresh app waiting for its one fetch.
    pub fn new(favorites: FavoritesStore) -> Self {
        Self {
            countries: Vec::new(),
            regions: Vec::new(),
            is_loading: true,
            error: None,
            query: DisplayQuery::default(),
            displayed: Vec::new(),
            favorites,
            favorites_query: FavoritesQuery::default(),
            page: Page::default(),
            status_message: String::from("Loading countries..."),
        }
    }

    pub fn from_config(favorites: FavoritesStore, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(favorites);
        app.query.set_limit(config.limit);
        app.query.sort_key = config.sort_key;
        app.query.sort_order = config.sort_order;
        app
    }

    /// Re-runs the pipeline over the full list.
    pub fn refresh(&mut self) {
        self.displayed = pipeline::apply(&self.countries, &self.query);
    }

    /// Favorites as shown on the favorites page.
    pub fn visible_favorites(&self) -> Vec<&FavoriteEntry> {
        self.favorites.query(&self.favorites_query)
    }

    /// Looks a country up by code in the full list, falling back to favorites
    /// so removals still work while the list is empty.
    pub fn find_country(&self, code: &str) -> Option<&Country> {
        self.countries
            .iter()
            .find(|c| c.code == code)
            .or_else(|| {
                self.favorites
                    .entries()
                    .iter()
                    .map(|e| &e.country)
                    .find(|c| c.code == code)
            })
    }
}
