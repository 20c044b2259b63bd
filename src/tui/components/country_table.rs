//! # Country Table Component
//!
//! The main list of the countries page. Follows the persistent state +
//! transient wrapper pattern:
//! - `TableSelection` lives in `TuiState` and survives across frames
//! - `CountryTable` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::catalog::Country;
use crate::core::favorites::FavoritesStore;
use crate::tui::components::format::{format_population, truncate_str};

/// Rows moved by PageUp/PageDown.
const PAGE_STEP: usize = 10;

/// Display columns kept for a name or capital before it is cut with "...".
pub const NAME_WIDTH: usize = 32;
pub const CAPITAL_WIDTH: usize = 20;

/// Selected row of a table, clamped to the row count on every move.
#[derive(Debug, Default)]
pub struct TableSelection {
    pub selected: usize,
    pub table_state: TableState,
}

impl TableSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected index, if the table has rows.
    pub fn selected(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.selected.min(len - 1))
    }

    pub fn up(&mut self, len: usize) {
        self.selected = self.selected.saturating_sub(1);
        self.clamp(len);
    }

    pub fn down(&mut self, len: usize) {
        self.selected = self.selected.saturating_add(1);
        self.clamp(len);
    }

    pub fn page_up(&mut self, len: usize) {
        self.selected = self.selected.saturating_sub(PAGE_STEP);
        self.clamp(len);
    }

    pub fn page_down(&mut self, len: usize) {
        self.selected = self.selected.saturating_add(PAGE_STEP);
        self.clamp(len);
    }

    pub fn reset(&mut self, len: usize) {
        self.selected = 0;
        self.clamp(len);
    }

    /// Keeps the selection inside `0..len` and mirrors it into `table_state`.
    pub fn clamp(&mut self, len: usize) {
        let selected = self.selected(len);
        self.selected = selected.unwrap_or(0);
        self.table_state.select(selected);
    }
}

pub struct CountryTable<'a> {
    selection: &'a mut TableSelection,
    countries: &'a [Country],
    favorites: &'a FavoritesStore,
}

impl<'a> CountryTable<'a> {
    pub fn new(
        selection: &'a mut TableSelection,
        countries: &'a [Country],
        favorites: &'a FavoritesStore,
    ) -> Self {
        Self {
            selection,
            countries,
            favorites,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.selection.clamp(self.countries.len());

        let header = Row::new(vec!["", "Name", "Region", "Capital", "Population"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .countries
            .iter()
            .map(|country| {
                let star = if self.favorites.is_favorite(&country.code) {
                    Cell::from("★").style(Style::default().fg(Color::Yellow))
                } else {
                    Cell::from("☆").style(Style::default().fg(Color::DarkGray))
                };
                Row::new(vec![
                    star,
                    Cell::from(truncate_str(&country.common_name, NAME_WIDTH)),
                    Cell::from(country.region.clone()),
                    Cell::from(truncate_str(country.capital().unwrap_or("-"), CAPITAL_WIDTH)),
                    Cell::from(format_population(country.population)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(1),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(13),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.selection.table_state);
    }
}
