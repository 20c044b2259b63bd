//! # TitleBar Component
//!
//! Top status bar: app name, page tabs, counts and the status message.
//!
//! ```text
//! Atlas │ Countries 40/250 │ Favorites (3) │ Added France to favorites
//! ```
//!
//! Stateless: every field is a prop supplied by the parent each frame. The
//! active page tab is highlighted; the status segment is omitted when empty.

use crate::core::state::Page;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    pub page: Page,
    /// Countries currently displayed on the countries page.
    pub shown: usize,
    /// Size of the full fetched list.
    pub total: usize,
    pub favorites_count: usize,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(
        page: Page,
        shown: usize,
        total: usize,
        favorites_count: usize,
        status_message: String,
    ) -> Self {
        Self {
            page,
            shown,
            total,
            favorites_count,
            status_message,
        }
    }

    fn tab_style(&self, page: Page) -> Style {
        if self.page == page {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let separator = Span::styled(" │ ", Style::default().fg(Color::DarkGray));

        let mut spans = vec![
            Span::styled("Atlas", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            separator.clone(),
            Span::styled(
                format!(" {} {}/{} ", Page::Countries.title(), self.shown, self.total),
                self.tab_style(Page::Countries),
            ),
            separator.clone(),
            Span::styled(
                format!(" {} ({}) ", Page::Favorites.title(), self.favorites_count),
                self.tab_style(Page::Favorites),
            ),
        ];

        if !self.status_message.is_empty() {
            spans.push(separator);
            spans.push(Span::raw(self.status_message.clone()));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_shows_counts_and_status() {
        let mut title_bar = TitleBar::new(
            Page::Countries,
            40,
            250,
            3,
            "Added France to favorites".to_string(),
        );
        let text = rendered(&mut title_bar);
        assert!(text.contains("Atlas"));
        assert!(text.contains("Countries 40/250"));
        assert!(text.contains("Favorites (3)"));
        assert!(text.contains("Added France to favorites"));
    }

    #[test]
    fn test_title_bar_without_status() {
        let mut title_bar = TitleBar::new(Page::Favorites, 0, 0, 0, String::new());
        let text = rendered(&mut title_bar);
        assert!(text.contains("Favorites (0)"));
        // Only the two tab separators
        assert_eq!(text.matches('│').count(), 2);
    }
}
