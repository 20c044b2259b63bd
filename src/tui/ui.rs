use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::core::state::{App, Page};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ControlsBar, CountryTable, FavoritesView, TitleBar};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Lays out the whole screen:
///
/// ```text
/// title bar      (1)
/// search input   (3)
/// controls bar   (1)
/// page body      (rest)
/// key help       (1)
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Length(1), Min(0), Length(1)]);
    let [title_area, search_area, controls_area, main_area, help_area] =
        layout.areas(frame.area());

    TitleBar::new(
        app.page,
        app.displayed.len(),
        app.countries.len(),
        app.favorites.count(),
        app.status_message.clone(),
    )
    .render(frame, title_area);

    let search_title = match app.page {
        Page::Countries => "Search countries",
        Page::Favorites => "Search favorites (name, region, capital)",
    };
    tui.search_bar.render(frame, search_area, search_title);

    ControlsBar::for_app(app).render(frame, controls_area);

    match app.page {
        Page::Countries => {
            if app.is_loading {
                draw_loading_view(frame, main_area, spinner_frame);
            } else if let Some(error_msg) = &app.error {
                draw_error_view(frame, main_area, error_msg);
            } else {
                CountryTable::new(&mut tui.country_selection, &app.displayed, &app.favorites)
                    .render(frame, main_area);
            }
        }
        Page::Favorites => {
            let entries = app.visible_favorites();
            FavoritesView::new(
                &mut tui.favorites_selection,
                &entries,
                app.favorites.stats(),
                tui.confirm_clear,
            )
            .render(frame, main_area);
        }
    }

    draw_help(frame, help_area, app.page);
}

fn draw_loading_view(frame: &mut Frame, area: Rect, spinner_frame: usize) {
    let spinner = SPINNER[spinner_frame % SPINNER.len()];
    let [_, center, _] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1), Constraint::Fill(1)])
            .areas(area);
    let loading = Paragraph::new(Line::from(vec![
        Span::styled(spinner, Style::default().fg(Color::Yellow)),
        Span::raw(" Loading countries..."),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(loading, center);
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    let error_paragraph = Paragraph::new(error_msg)
        .style(Style::default().fg(Color::Red))
        .block(
            Block::bordered()
                .title("ERROR")
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(error_paragraph, area);
}

fn draw_help(frame: &mut Frame, area: Rect, page: Page) {
    let text = match page {
        Page::Countries => {
            " Enter ★ favorite  ↑↓ move  ←→ limit  ^R region  ^S sort  ^O order  Tab favorites  Esc clear/quit "
        }
        Page::Favorites => {
            " Enter/Del remove  ↑↓ move  ^R region  ^S sort  ^O order  ^X clear all  Tab countries  Esc clear/quit "
        }
    };
    let help = Paragraph::new(text).style(
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    );
    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::{loaded_app, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(120, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_loading() {
        let app = test_app();
        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);
        assert!(text.contains("Loading countries..."));
        assert!(text.contains("Countries 0/0"));
    }

    #[test]
    fn test_draw_error() {
        let mut app = test_app();
        update(&mut app, Action::FetchFailed("network error: boom".to_string()));
        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);
        assert!(text.contains("ERROR"));
        assert!(text.contains("network error: boom"));
    }

    #[test]
    fn test_draw_countries_page() {
        let app = loaded_app();
        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);
        assert!(text.contains("Countries 5/5"));
        assert!(text.contains("Egypt"));
        assert!(text.contains("Nigeria"));
        assert!(text.contains("Region: all"));
    }

    #[test]
    fn test_draw_favorites_page() {
        let mut app = loaded_app();
        update(&mut app, Action::ToggleFavorite("JPN".to_string()));
        update(&mut app, Action::NextPage);
        let mut tui = TuiState::new();
        let text = screen(&app, &mut tui);
        assert!(text.contains("Favorites (1)"));
        assert!(text.contains("Japan"));
        assert!(text.contains("^X clear all"));
    }
}
