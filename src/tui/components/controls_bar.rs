//! # ControlsBar Component
//!
//! One line summarizing the active page's filter and sort settings, each with
//! the chord that changes it:
//!
//! ```text
//! Region: Europe [^R]   Sort: name ↑ [^S ^O]   Limit: 40 [←/→]
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::state::{App, Page};
use crate::tui::component::Component;

/// A single labelled setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub value: String,
    pub keys: &'static str,
}

pub struct ControlsBar {
    pub controls: Vec<Control>,
}

impl ControlsBar {
    /// Controls for whichever page is active.
    pub fn for_app(app: &App) -> Self {
        let controls = match app.page {
            Page::Countries => vec![
                Control {
                    label: "Region",
                    value: region_label(&app.query.region_filter),
                    keys: "^R",
                },
                Control {
                    label: "Sort",
                    value: format!(
                        "{} {}",
                        app.query.sort_key.label(),
                        app.query.sort_order.arrow()
                    ),
                    keys: "^S ^O",
                },
                Control {
                    label: "Limit",
                    value: app.query.limit.to_string(),
                    keys: "←/→",
                },
            ],
            Page::Favorites => vec![
                Control {
                    label: "Region",
                    value: favorites_region_label(app),
                    keys: "^R",
                },
                Control {
                    label: "Sort",
                    value: format!(
                        "{} {}",
                        app.favorites_query.sort_key.label(),
                        app.favorites_query.sort_order.arrow()
                    ),
                    keys: "^S ^O",
                },
            ],
        };
        Self { controls }
    }
}

fn region_label(region: &str) -> String {
    if region.is_empty() {
        "all".to_string()
    } else {
        region.to_string()
    }
}

/// Favorites region label with the number of favorites in that region.
fn favorites_region_label(app: &App) -> String {
    let region = &app.favorites_query.region_filter;
    if region.is_empty() {
        format!("all ({})", app.favorites.count())
    } else {
        format!("{} ({})", region, app.favorites.by_region(region).len())
    }
}

impl Component for ControlsBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for (i, control) in self.controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(
                format!("{}: ", control.label),
                Style::default().fg(Color::Gray),
            ));
            spans.push(Span::styled(
                control.value.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" [{}]", control.keys),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
