//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User types in the search box? That's `Action::SetSearchTerm(text)`.
//! The fetch settles? That's `Action::CountriesLoaded(list)` or `Action::FetchFailed(msg)`.
//!
//! The `update()` function takes the current state and an action and mutates
//! it in place. The only I/O it triggers is the favorites persistence hook.
//!
//! ```text
//! State + Action  →  update()  →  New State (+ Effect)
//! ```
//!
//! Display actions target whichever page is active: on the favorites page,
//! search/region/sort edit `favorites_query` instead of the country query.

use log::{debug, info, warn};

use crate::catalog::Country;
use crate::core::pipeline::{self, SortOrder};
use crate::core::state::{App, Page};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The one fetch succeeded.
    CountriesLoaded(Vec<Country>),
    /// The one fetch failed; carries the user-visible message.
    FetchFailed(String),
    SetSearchTerm(String),
    /// Empty string clears the filter.
    SetRegionFilter(String),
    /// Steps through "all" and each known region.
    CycleRegion,
    /// Resets search term and region filter on the active page.
    ClearFilters,
    CycleSortKey,
    SetSortOrder(SortOrder),
    ToggleSortOrder,
    SetLimit(u16),
    AdjustLimit(i32),
    ToggleFavorite(String),
    RemoveFavorite(String),
    ClearFavorites,
    NextPage,
    Quit,
}

/// What the caller should do after `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", ActionSummary(&action));
    match action {
        Action::CountriesLoaded(countries) => {
            info!("Loaded {} countries", countries.len());
            app.regions = pipeline::derive_regions(&countries);
            app.countries = countries;
            app.is_loading = false;
            app.error = None;
            app.status_message = format!("{} countries", app.countries.len());
            app.refresh();
        }
        Action::FetchFailed(message) => {
            warn!("Country fetch failed: {}", message);
            app.countries.clear();
            app.regions.clear();
            app.displayed.clear();
            app.is_loading = false;
            app.status_message = String::from("Failed to load countries");
            app.error = Some(message);
        }
        Action::SetSearchTerm(term) => match app.page {
            Page::Countries => {
                app.query.search_term = term;
                app.refresh();
            }
            Page::Favorites => app.favorites_query.search_term = term,
        },
        Action::SetRegionFilter(region) => set_region(app, region),
        Action::ClearFilters => {
            match app.page {
                Page::Countries => app.query.search_term.clear(),
                Page::Favorites => app.favorites_query.search_term.clear(),
            }
            app.status_message = String::from("Filters cleared");
            set_region(app, String::new());
        }
        Action::CycleRegion => {
            let (regions, current) = match app.page {
                Page::Countries => (app.regions.clone(), app.query.region_filter.clone()),
                Page::Favorites => (
                    app.favorites.regions(),
                    app.favorites_query.region_filter.clone(),
                ),
            };
            let next = next_region(&regions, &current);
            app.status_message = if next.is_empty() {
                String::from("Region: all")
            } else {
                format!("Region: {next}")
            };
            set_region(app, next);
        }
        Action::CycleSortKey => match app.page {
            Page::Countries => {
                app.query.sort_key = app.query.sort_key.next();
                app.status_message = format!("Sort: {}", app.query.sort_key.label());
                app.refresh();
            }
            Page::Favorites => {
                app.favorites_query.sort_key = app.favorites_query.sort_key.next();
                app.status_message = format!("Sort: {}", app.favorites_query.sort_key.label());
            }
        },
        Action::SetSortOrder(order) => match app.page {
            Page::Countries => {
                app.query.sort_order = order;
                app.refresh();
            }
            Page::Favorites => app.favorites_query.sort_order = order,
        },
        Action::ToggleSortOrder => {
            let order = match app.page {
                Page::Countries => app.query.sort_order.toggle(),
                Page::Favorites => app.favorites_query.sort_order.toggle(),
            };
            return update(app, Action::SetSortOrder(order));
        }
        Action::SetLimit(limit) => {
            app.query.set_limit(limit);
            app.status_message = format!("Showing up to {}", app.query.limit);
            app.refresh();
        }
        Action::AdjustLimit(delta) => {
            let limit = (app.query.limit as i32 + delta).clamp(0, pipeline::MAX_LIMIT as i32);
            return update(app, Action::SetLimit(limit as u16));
        }
        Action::ToggleFavorite(code) => match app.find_country(&code).cloned() {
            Some(country) => {
                let now_favorite = app.favorites.toggle(&country);
                app.status_message = if now_favorite {
                    format!("Added {} to favorites", country.common_name)
                } else {
                    format!("Removed {} from favorites", country.common_name)
                };
            }
            None => warn!("ToggleFavorite for unknown country {}", code),
        },
        Action::RemoveFavorite(code) => {
            if app.favorites.remove(&code) {
                app.status_message = format!("Removed {code} from favorites");
            }
        }
        Action::ClearFavorites => {
            app.favorites.clear();
            app.favorites_query.region_filter.clear();
            app.status_message = String::from("Favorites cleared");
        }
        Action::NextPage => app.page = app.page.next(),
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}

fn set_region(app: &mut App, region: String) {
    match app.page {
        Page::Countries => {
            app.query.region_filter = region;
            app.refresh();
        }
        Page::Favorites => app.favorites_query.region_filter = region,
    }
}

/// "" → first region → … → last region → "".
fn next_region(regions: &[String], current: &str) -> String {
    if current.is_empty() {
        return regions.first().cloned().unwrap_or_default();
    }
    match regions.iter().position(|r| r == current) {
        Some(i) => regions.get(i + 1).cloned().unwrap_or_default(),
        None => String::new(),
    }
}

/// Keeps the debug log readable when a whole country list passes through.
struct ActionSummary<'a>(&'a Action);

impl std::fmt::Debug for ActionSummary<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::CountriesLoaded(list) => write!(f, "CountriesLoaded({} countries)", list.len()),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::SortKey;
    use crate::test_support::{country, loaded_app, sample_countries, test_app};

    fn names(app: &App) -> Vec<&str> {
        app.displayed.iter().map(|c| c.common_name.as_str()).collect()
    }

    #[test]
    fn test_countries_loaded_sets_list_and_regions() {
        let mut app = test_app();
        let effect = update(&mut app, Action::CountriesLoaded(sample_countries()));
        assert_eq!(effect, Effect::None);
        assert!(!app.is_loading);
        assert!(app.error.is_none());
        assert_eq!(app.countries.len(), 5);
        assert_eq!(app.regions, vec!["Africa", "Asia", "Europe"]);
        assert_eq!(names(&app), vec!["Egypt", "France", "Germany", "Japan", "Nigeria"]);
    }

    #[test]
    fn test_fetch_failure_ends_loading_and_sets_error() {
        let mut app = test_app();
        update(
            &mut app,
            Action::FetchFailed("network error: connection refused".to_string()),
        );
        assert!(!app.is_loading);
        assert_eq!(app.error.as_deref(), Some("network error: connection refused"));
        assert!(app.countries.is_empty());
        assert!(app.displayed.is_empty());
    }

    #[test]
    fn test_region_filter_then_search() {
        let mut app = loaded_app();
        update(&mut app, Action::SetRegionFilter("Europe".to_string()));
        assert_eq!(names(&app), vec!["France", "Germany"]);

        update(&mut app, Action::SetSearchTerm("Germ".to_string()));
        assert_eq!(names(&app), vec!["Germany"]);

        update(&mut app, Action::SetSearchTerm("Nigeria".to_string()));
        assert!(app.displayed.is_empty());
    }

    #[test]
    fn test_cycle_region_wraps_to_all() {
        let mut app = loaded_app();
        update(&mut app, Action::CycleRegion);
        assert_eq!(app.query.region_filter, "Africa");
        update(&mut app, Action::CycleRegion);
        assert_eq!(app.query.region_filter, "Asia");
        update(&mut app, Action::CycleRegion);
        assert_eq!(app.query.region_filter, "Europe");
        update(&mut app, Action::CycleRegion);
        assert_eq!(app.query.region_filter, "");
        assert_eq!(app.displayed.len(), 5);
        assert_eq!(app.status_message, "Region: all");
    }

    #[test]
    fn test_sort_actions_recompute() {
        let mut app = loaded_app();
        update(&mut app, Action::CycleSortKey);
        assert_eq!(app.query.sort_key, SortKey::Population);
        assert_eq!(names(&app)[0], "France");

        update(&mut app, Action::ToggleSortOrder);
        assert_eq!(app.query.sort_order, SortOrder::Desc);
        assert_eq!(names(&app)[0], "Nigeria");
    }

    #[test]
    fn test_limit_actions_clamp() {
        let mut app = loaded_app();
        update(&mut app, Action::SetLimit(0));
        assert!(app.displayed.is_empty());

        update(&mut app, Action::AdjustLimit(-10));
        assert_eq!(app.query.limit, 0);

        update(&mut app, Action::AdjustLimit(2));
        assert_eq!(names(&app), vec!["Egypt", "France"]);

        update(&mut app, Action::SetLimit(400));
        assert_eq!(app.query.limit, pipeline::MAX_LIMIT);
        assert_eq!(app.displayed.len(), 5);
    }

    #[test]
    fn test_toggle_favorite_round_trip() {
        let mut app = loaded_app();
        let before = app.favorites.count();

        update(&mut app, Action::ToggleFavorite("FRA".to_string()));
        assert!(app.favorites.is_favorite("FRA"));
        assert_eq!(app.status_message, "Added France to favorites");

        update(&mut app, Action::ToggleFavorite("FRA".to_string()));
        assert!(!app.favorites.is_favorite("FRA"));
        assert_eq!(app.favorites.count(), before);
    }

    #[test]
    fn test_toggle_unknown_country_is_ignored() {
        let mut app = loaded_app();
        update(&mut app, Action::ToggleFavorite("XXX".to_string()));
        assert_eq!(app.favorites.count(), 0);
    }

    #[test]
    fn test_favorites_page_has_independent_controls() {
        let mut app = loaded_app();
        update(&mut app, Action::ToggleFavorite("NGA".to_string()));
        update(&mut app, Action::ToggleFavorite("JPN".to_string()));
        update(&mut app, Action::NextPage);
        assert_eq!(app.page, Page::Favorites);

        update(&mut app, Action::SetSearchTerm("tok".to_string()));
        assert_eq!(app.favorites_query.search_term, "tok");
        assert!(app.query.search_term.is_empty());
        assert_eq!(app.visible_favorites().len(), 1);

        update(&mut app, Action::SetSearchTerm(String::new()));
        update(&mut app, Action::CycleRegion);
        assert_eq!(app.favorites_query.region_filter, "Africa");
        assert!(app.query.region_filter.is_empty());
        assert_eq!(app.displayed.len(), 5);
    }

    #[test]
    fn test_favorites_cycle_region_skips_empty_region() {
        let mut app = loaded_app();
        app.favorites.add(&country("XKX", "Nowhereland", "", 10));
        update(&mut app, Action::ToggleFavorite("NGA".to_string()));
        update(&mut app, Action::NextPage);

        update(&mut app, Action::CycleRegion);
        assert_eq!(app.favorites_query.region_filter, "Africa");
        assert_eq!(app.status_message, "Region: Africa");
        update(&mut app, Action::CycleRegion);
        assert_eq!(app.favorites_query.region_filter, "");
        update(&mut app, Action::CycleRegion);
        assert_eq!(app.favorites_query.region_filter, "Africa");
    }

    #[test]
    fn test_sort_actions_follow_active_page() {
        let mut app = loaded_app();
        update(&mut app, Action::NextPage);
        update(&mut app, Action::CycleSortKey);
        update(&mut app, Action::ToggleSortOrder);
        assert_eq!(app.favorites_query.sort_key.label(), "name");
        assert_eq!(app.favorites_query.sort_order, SortOrder::Asc);
        assert_eq!(app.query.sort_key, SortKey::Name);
        assert_eq!(app.query.sort_order, SortOrder::Asc);
    }

    #[test]
    fn test_clear_filters_resets_search_and_region() {
        let mut app = loaded_app();
        update(&mut app, Action::SetRegionFilter("Europe".to_string()));
        update(&mut app, Action::SetSearchTerm("fr".to_string()));
        assert_eq!(names(&app), vec!["France"]);

        update(&mut app, Action::ClearFilters);
        assert!(app.query.search_term.is_empty());
        assert!(app.query.region_filter.is_empty());
        assert_eq!(app.displayed.len(), 5);

        update(&mut app, Action::ToggleFavorite("JPN".to_string()));
        update(&mut app, Action::NextPage);
        update(&mut app, Action::SetRegionFilter("Asia".to_string()));
        update(&mut app, Action::SetSearchTerm("tok".to_string()));
        update(&mut app, Action::ClearFilters);
        assert!(app.favorites_query.search_term.is_empty());
        assert!(app.favorites_query.region_filter.is_empty());
    }

    #[test]
    fn test_remove_and_clear_favorites() {
        let mut app = loaded_app();
        update(&mut app, Action::ToggleFavorite("EGY".to_string()));
        update(&mut app, Action::ToggleFavorite("JPN".to_string()));

        update(&mut app, Action::RemoveFavorite("EGY".to_string()));
        assert!(!app.favorites.is_favorite("EGY"));

        update(&mut app, Action::ClearFavorites);
        assert_eq!(app.favorites.count(), 0);
    }

    #[test]
    fn test_quit_effect() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_next_region_unknown_current_resets() {
        let regions = vec!["Africa".to_string()];
        assert_eq!(next_region(&regions, "Mars"), "");
        assert_eq!(next_region(&[], ""), "");
    }
}
