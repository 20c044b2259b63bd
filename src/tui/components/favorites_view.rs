//! # Favorites View Component
//!
//! Body of the favorites page: a stats strip over a table of the favorites
//! matching the page's own search/region/sort settings.
//!
//! ```text
//! ┌ Stats ──────────────────────────────────────────────────────────────┐
//! │ 5 countries   3 regions   599,267,667 people   avg 119.9M   top Nigeria │
//! │ Africa (2)  Asia (1)  Europe (2)                                    │
//! └─────────────────────────────────────────────────────────────────────┘
//!   Name        Region   Capital   Population    Added
//! ▶ Japan       Asia     Tokyo     125,836,021   2024-01-15
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::core::favorites::{FavoriteEntry, FavoriteStats};
use crate::tui::components::country_table::{CAPITAL_WIDTH, NAME_WIDTH, TableSelection};
use crate::tui::components::format::{
    format_added_at, format_millions, format_population, truncate_str,
};

pub struct FavoritesView<'a> {
    selection: &'a mut TableSelection,
    entries: &'a [&'a FavoriteEntry],
    stats: FavoriteStats,
    confirm_clear: bool,
}

impl<'a> FavoritesView<'a> {
    pub fn new(
        selection: &'a mut TableSelection,
        entries: &'a [&'a FavoriteEntry],
        stats: FavoriteStats,
        confirm_clear: bool,
    ) -> Self {
        Self {
            selection,
            entries,
            stats,
            confirm_clear,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.stats.total_count == 0 {
            let empty = Paragraph::new(vec![
                Line::from(Span::styled(
                    "No favorite countries yet",
                    Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Press Enter on a country to add it",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
            frame.render_widget(empty, area);
            return;
        }

        let [stats_area, table_area] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);

        self.render_stats(frame, stats_area);
        self.render_table(frame, table_area);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect) {
        let value = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let label = Style::default().fg(Color::Gray);

        let line = Line::from(vec![
            Span::styled(self.stats.total_count.to_string(), value),
            Span::styled(" countries   ", label),
            Span::styled(self.stats.regions.len().to_string(), value),
            Span::styled(" regions   ", label),
            Span::styled(format_population(self.stats.total_population), value),
            Span::styled(" people   avg ", label),
            Span::styled(format_millions(self.stats.average_population), value),
            Span::styled("   top ", label),
            Span::styled(
                self.stats.most_populous.clone().unwrap_or_else(|| "N/A".to_string()),
                value,
            ),
        ]);

        let breakdown = Line::from(
            self.stats
                .regions
                .iter()
                .map(|(region, count)| {
                    let name = if region.is_empty() { "Unknown" } else { region };
                    Span::styled(format!("{name} ({count})  "), label)
                })
                .collect::<Vec<_>>(),
        );

        let (title, border) = if self.confirm_clear {
            (
                " Press Ctrl+X again to clear all favorites ",
                Style::default().fg(Color::Red),
            )
        } else {
            (" Stats ", Style::default().fg(Color::DarkGray))
        };

        let block = Block::bordered().title(title).border_style(border);
        frame.render_widget(Paragraph::new(vec![line, breakdown]).block(block), area);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        self.selection.clamp(self.entries.len());

        if self.entries.is_empty() {
            let none = Paragraph::new("No favorites match the current filters")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(none, area);
            return;
        }

        let header = Row::new(vec!["Name", "Region", "Capital", "Population", "Added"])
            .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .entries
            .iter()
            .map(|entry| {
                let country = &entry.country;
                Row::new(vec![
                    Cell::from(truncate_str(&country.common_name, NAME_WIDTH)),
                    Cell::from(country.region.clone()),
                    Cell::from(truncate_str(country.capital().unwrap_or("-"), CAPITAL_WIDTH)),
                    Cell::from(format_population(country.population)),
                    Cell::from(format_added_at(entry.added_at)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Fill(2),
            Constraint::Length(13),
            Constraint::Length(10),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.selection.table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::favorites::{FavoritesQuery, FavoritesStore};
    use crate::test_support::sample_countries;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(store: &FavoritesStore, confirm_clear: bool) -> String {
        let entries = store.query(&FavoritesQuery::default());
        let backend = TestBackend::new(100, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut sel = TableSelection::new();
        terminal
            .draw(|f| {
                FavoritesView::new(&mut sel, &entries, store.stats(), confirm_clear)
                    .render(f, f.area())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_state() {
        let store = FavoritesStore::in_memory();
        let text = render_text(&store, false);
        assert!(text.contains("No favorite countries yet"));
    }

    #[test]
    fn test_stats_and_rows() {
        let mut store = FavoritesStore::in_memory();
        for (i, c) in sample_countries().iter().enumerate() {
            store.add_at(c, 1_700_000_000_000 + i as i64);
        }
        let text = render_text(&store, false);
        assert!(text.contains("5 countries"));
        assert!(text.contains("3 regions"));
        assert!(text.contains("top Nigeria"));
        assert!(text.contains("Tokyo"));
        assert!(text.contains("Stats"));
        assert!(text.contains("Africa (2)"));
        assert!(text.contains("Asia (1)"));
        assert!(text.contains("Europe (2)"));
    }

    #[test]
    fn test_confirm_clear_banner() {
        let mut store = FavoritesStore::in_memory();
        store.add(&sample_countries()[0]);
        let text = render_text(&store, true);
        assert!(text.contains("Press Ctrl+X again"));
    }
}
