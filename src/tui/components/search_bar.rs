//! # SearchBar Component
//!
//! Single-line text input. Typing always lands here; the bar emits
//! `SearchEvent::Changed` with the full text after every edit so the parent
//! can dispatch `Action::SetSearchTerm`.
//!
//! The cursor is pinned to the end of the text. Width is measured in display
//! columns so names like "Côte d'Ivoire" place the cursor correctly.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Events emitted by the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Changed(String),
}

#[derive(Debug, Default)]
pub struct SearchBar {
    text: String,
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replaces the text without emitting an event (used on page switch).
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, title: &str) {
        let (content, style) = if self.text.is_empty() {
            ("Type to search...", Style::default().fg(Color::DarkGray))
        } else {
            (self.text.as_str(), Style::default())
        };

        let input = Paragraph::new(content)
            .style(style)
            .block(Block::bordered().title(format!(" {title} ")));
        frame.render_widget(input, area);

        // Inside the left border, after the text
        let max_x = area.x + area.width.saturating_sub(2);
        let text_width = u16::try_from(self.text.width()).unwrap_or(u16::MAX);
        let x = area.x.saturating_add(1).saturating_add(text_width).min(max_x);
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}

impl EventHandler for SearchBar {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SearchEvent> {
        match event {
            TuiEvent::InputChar(c) if !c.is_control() => {
                self.text.push(*c);
            }
            TuiEvent::Paste(data) => {
                let single_line: String = data.chars().filter(|c| !c.is_control()).collect();
                if single_line.is_empty() {
                    return None;
                }
                self.text.push_str(&single_line);
            }
            TuiEvent::Backspace => {
                self.text.pop()?;
            }
            _ => return None,
        }
        Some(SearchEvent::Changed(self.text.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_typing_emits_full_text() {
        let mut bar = SearchBar::new();
        assert_eq!(bar.handle_event(&TuiEvent::InputChar('G')), Some(SearchEvent::Changed("G".into())));
        assert_eq!(
            bar.handle_event(&TuiEvent::InputChar('e')),
            Some(SearchEvent::Changed("Ge".into()))
        );
        assert_eq!(bar.text(), "Ge");
    }

    #[test]
    fn test_backspace() {
        let mut bar = SearchBar::new();
        bar.set_text("Côte");
        assert_eq!(
            bar.handle_event(&TuiEvent::Backspace),
            Some(SearchEvent::Changed("Côt".into()))
        );
        bar.set_text("");
        assert_eq!(bar.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_paste_strips_newlines() {
        let mut bar = SearchBar::new();
        assert_eq!(
            bar.handle_event(&TuiEvent::Paste("New\nZealand".into())),
            Some(SearchEvent::Changed("NewZealand".into()))
        );
        assert_eq!(bar.handle_event(&TuiEvent::Paste("\n".into())), None);
    }

    #[test]
    fn test_ignores_other_events() {
        let mut bar = SearchBar::new();
        assert_eq!(bar.handle_event(&TuiEvent::CursorDown), None);
        assert_eq!(bar.handle_event(&TuiEvent::InputChar('\n')), None);
        assert!(bar.is_empty());
    }

    #[test]
    fn test_render_placeholder_and_text() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = SearchBar::new();

        terminal.draw(|f| bar.render(f, f.area(), "Search")).unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Type to search..."));

        bar.set_text("Japan");
        terminal.draw(|f| bar.render(f, f.area(), "Search")).unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Japan"));
        assert!(!text.contains("Type to search..."));
    }

    #[test]
    fn test_cursor_clamped_for_oversized_text() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut bar = SearchBar::new();
        bar.set_text(&"x".repeat(usize::from(u16::MAX) + 10));

        terminal.draw(|f| bar.render(f, f.area(), "Search")).unwrap();
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor, Position::new(38, 1));
    }
}
