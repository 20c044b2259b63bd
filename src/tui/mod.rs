//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm key ─► TuiEvent ─► handle_event() ─► core::update()
//!                                                    ▲
//! fetch task (tokio) ── Action over mpsc ────────────┘
//! ```
//!
//! The country fetch is spawned exactly once at startup. Its result comes
//! back as an `Action` on a channel drained by the event loop; if the loop has
//! already exited, the result is dropped.
//!
//! ## Redraw Strategy
//!
//! While loading, the loop redraws every ~80ms to animate the spinner. Once
//! idle it sleeps up to 500ms and only redraws on input or a fetch result.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::catalog::{CountrySource, RestCountriesSource};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::favorites::{FavoritesStorage, FavoritesStore, JsonFileStorage, MemoryStorage};
use crate::core::state::{App, Page};
use crate::tui::component::EventHandler;
use crate::tui::components::{SearchBar, SearchEvent, TableSelection};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Limit change per ←/→ press.
const LIMIT_STEP: i32 = 10;

/// TUI-specific presentation state (not part of core business logic)
pub(crate) struct TuiState {
    pub search_bar: SearchBar,
    pub country_selection: TableSelection,
    pub favorites_selection: TableSelection,
    /// First Ctrl+X on the favorites page arms this; the second one clears.
    pub confirm_clear: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_bar: SearchBar::new(),
            country_selection: TableSelection::new(),
            favorites_selection: TableSelection::new(),
            confirm_clear: false,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor in the search bar
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, SetCursorStyle::DefaultUserShape);
    }
}

/// Build the favorites store from the resolved config.
pub fn build_favorites(config: &ResolvedConfig) -> FavoritesStore {
    let storage: Box<dyn FavoritesStorage> = match &config.favorites_path {
        Some(path) => {
            info!("Favorites file: {}", path.display());
            Box::new(JsonFileStorage::new(path.clone()))
        }
        None => {
            info!("Favorites persistence disabled");
            Box::new(MemoryStorage::new())
        }
    };
    FavoritesStore::load(storage)
}

/// Build the country source from the resolved config.
pub fn build_source(config: &ResolvedConfig) -> Arc<dyn CountrySource> {
    Arc::new(RestCountriesSource::new(Some(config.endpoint.clone())))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(build_favorites(&config), &config);
    app.refresh();
    let mut tui = TuiState::new();

    // Channel for actions from the fetch task
    let (tx, rx) = mpsc::channel();
    spawn_fetch(build_source(&config), tx);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, event) == Effect::Quit {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Fetch result, if it has arrived
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            update(&mut app, action);
            sync_selection(&app, &mut tui);
        }
    }

    ratatui::restore();
    info!("Atlas shutting down");
    Ok(())
}

/// Spawns the one-shot country fetch. The result is posted back as
/// `CountriesLoaded` or `FetchFailed`.
pub fn spawn_fetch(
    source: Arc<dyn CountrySource>,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning country fetch ({})", source.name());
    tokio::spawn(async move {
        let action = match source.fetch_all().await {
            Ok(countries) => Action::CountriesLoaded(countries),
            Err(e) => Action::FetchFailed(e.to_string()),
        };
        if tx.send(action).is_err() {
            warn!("Fetch finished after the UI closed; result dropped");
        }
    })
}

/// Routes one terminal event to the search bar, the selection, or `update`.
pub(crate) fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    // Any key other than a second Ctrl+X disarms the clear confirmation
    if !matches!(event, TuiEvent::ClearFavorites) {
        tui.confirm_clear = false;
    }

    let effect = match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::ForceQuit => update(app, Action::Quit),
        TuiEvent::NextPage => {
            let effect = update(app, Action::NextPage);
            let term = match app.page {
                Page::Countries => app.query.search_term.clone(),
                Page::Favorites => app.favorites_query.search_term.clone(),
            };
            tui.search_bar.set_text(&term);
            effect
        }
        TuiEvent::CycleRegion => {
            let effect = update(app, Action::CycleRegion);
            reset_selection(app, tui);
            effect
        }
        TuiEvent::CycleSortKey => update(app, Action::CycleSortKey),
        TuiEvent::ToggleSortOrder => update(app, Action::ToggleSortOrder),
        TuiEvent::LimitDown if app.page == Page::Countries => {
            update(app, Action::AdjustLimit(-LIMIT_STEP))
        }
        TuiEvent::LimitUp if app.page == Page::Countries => {
            update(app, Action::AdjustLimit(LIMIT_STEP))
        }
        TuiEvent::ClearFavorites if app.page == Page::Favorites && !app.favorites.is_empty() => {
            if tui.confirm_clear {
                tui.confirm_clear = false;
                update(app, Action::ClearFavorites)
            } else {
                tui.confirm_clear = true;
                Effect::None
            }
        }
        TuiEvent::CursorUp => {
            let len = visible_len(app);
            active_selection(app.page, tui).up(len);
            Effect::None
        }
        TuiEvent::CursorDown => {
            let len = visible_len(app);
            active_selection(app.page, tui).down(len);
            Effect::None
        }
        TuiEvent::PageUp => {
            let len = visible_len(app);
            active_selection(app.page, tui).page_up(len);
            Effect::None
        }
        TuiEvent::PageDown => {
            let len = visible_len(app);
            active_selection(app.page, tui).page_down(len);
            Effect::None
        }
        TuiEvent::Submit => match selected_code(app, tui) {
            Some(code) => match app.page {
                Page::Countries => update(app, Action::ToggleFavorite(code)),
                Page::Favorites => update(app, Action::RemoveFavorite(code)),
            },
            None => Effect::None,
        },
        TuiEvent::Delete if app.page == Page::Favorites => match selected_code(app, tui) {
            Some(code) => update(app, Action::RemoveFavorite(code)),
            None => Effect::None,
        },
        TuiEvent::Escape => {
            let region_filter = match app.page {
                Page::Countries => &app.query.region_filter,
                Page::Favorites => &app.favorites_query.region_filter,
            };
            if tui.search_bar.is_empty() && region_filter.is_empty() {
                update(app, Action::Quit)
            } else {
                tui.search_bar.set_text("");
                let effect = update(app, Action::ClearFilters);
                reset_selection(app, tui);
                effect
            }
        }
        other => match tui.search_bar.handle_event(&other) {
            Some(SearchEvent::Changed(text)) => {
                let effect = update(app, Action::SetSearchTerm(text));
                reset_selection(app, tui);
                effect
            }
            None => Effect::None,
        },
    };

    sync_selection(app, tui);
    effect
}

fn active_selection(page: Page, tui: &mut TuiState) -> &mut TableSelection {
    match page {
        Page::Countries => &mut tui.country_selection,
        Page::Favorites => &mut tui.favorites_selection,
    }
}

fn visible_len(app: &App) -> usize {
    match app.page {
        Page::Countries => app.displayed.len(),
        Page::Favorites => app.visible_favorites().len(),
    }
}

/// Code of the highlighted row on the active page.
fn selected_code(app: &App, tui: &TuiState) -> Option<String> {
    match app.page {
        Page::Countries => tui
            .country_selection
            .selected(app.displayed.len())
            .map(|i| app.displayed[i].code.clone()),
        Page::Favorites => {
            let entries = app.visible_favorites();
            tui.favorites_selection
                .selected(entries.len())
                .map(|i| entries[i].country.code.clone())
        }
    }
}

fn reset_selection(app: &App, tui: &mut TuiState) {
    let len = visible_len(app);
    active_selection(app.page, tui).reset(len);
}

/// Keeps both selections inside their lists after the lists changed.
fn sync_selection(app: &App, tui: &mut TuiState) {
    tui.country_selection.clamp(app.displayed.len());
    tui.favorites_selection
        .clamp(app.visible_favorites().len());
    debug!(
        "selection: countries={} favorites={}",
        tui.country_selection.selected, tui.favorites_selection.selected
    );
}
