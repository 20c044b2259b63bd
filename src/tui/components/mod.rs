//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: page tabs, counts and status message
//! - `ControlsBar`: region / sort / limit summary for the active page
//!
//! ### Stateful Components
//!
//! - `SearchBar`: text input, emits `SearchEvent::Changed`
//! - `CountryTable`: countries page list over a persistent `TableSelection`
//! - `FavoritesView`: stats strip + favorites list over a `TableSelection`
//!
//! Components receive external data as props (fields or constructor
//! arguments), never by reaching into `App` themselves.
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top status bar)
//! ├── search_bar.rs      (Search input)
//! ├── controls_bar.rs    (Filter/sort summary line)
//! ├── country_table.rs   (Countries list + TableSelection)
//! ├── favorites_view.rs  (Favorites stats + list)
//! └── format.rs          (Number/date/width helpers)
//! ```

pub mod controls_bar;
pub mod country_table;
pub mod favorites_view;
pub mod format;
pub mod search_bar;
mod title_bar;

pub use controls_bar::ControlsBar;
pub use country_table::{CountryTable, TableSelection};
pub use favorites_view::FavoritesView;
pub use search_bar::{SearchBar, SearchEvent};
pub use title_bar::TitleBar;
