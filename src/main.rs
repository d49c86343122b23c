// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! # CourseFinder TUI.
//!
//! A terminal course catalogue: search courses, lists and people, browse
//! curated lists with faceted filters, see what is trending, and keep a
//! watchlist.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle, application state and
//!   UI rendering.
//! * **Background Workers** handle backend requests and database queries via
//!   asynchronous task processing.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels.

mod api;
mod commander;
mod components;
mod config;
mod db;
mod events;
mod logging;
mod model;
mod render;
mod route;
mod search;
mod store;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    io::{self},
    sync::mpsc::{self, Receiver, Sender},
    thread,
};

use crate::{
    commander::Commander,
    components::{
        CourseView, DiscoverView, HomeView, SearchMode, SearchPanel, TrendingView, WatchlistView,
    },
    config::AppConfig,
    events::{AppEvent, apply_route, process_events},
    model::User,
    route::Navigator,
    search::coordinator::SearchCache,
    store::{AppStore, UserAction},
    tasks::AppTask,
    theme::Theme,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MainView {
    Home,
    Discover,
    Trending,
    Search,
    Course,
    Watchlist,
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: MainView,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub store: AppStore,
    pub navigator: Navigator,
    pub search_cache: SearchCache,

    pub overlay: SearchPanel,
    pub search_page: SearchPanel,
    pub home_view: HomeView,
    pub discover_view: DiscoverView,
    pub trending_view: TrendingView,
    pub course_view: CourseView,
    pub watchlist_view: WatchlistView,

    pub commander: Commander,

    /// Last error reported by a task, shown until replaced.
    pub status: Option<String>,

    pub persist_config: bool,
    pub paint_terminal_bg: bool,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(
        config: AppConfig,
        event_tx: Sender<AppEvent>,
        event_rx: Receiver<AppEvent>,
        task_tx: Sender<AppTask>,
    ) -> Self {
        let mut store = AppStore::new(config.history_limit);
        if let Some(username) = config.username.as_deref().filter(|u| !u.trim().is_empty()) {
            store.dispatch(UserAction::SignIn(User::from_username(username)));
        }

        Self {
            theme: Theme::for_mode(store.ui.theme),
            main_view: MainView::Home,
            event_tx,
            event_rx,
            task_tx,
            store,
            navigator: Navigator::default(),
            search_cache: SearchCache::new(config.cache_stale_after()),
            overlay: SearchPanel::new(SearchMode::Overlay, config.debounce()),
            search_page: SearchPanel::new(SearchMode::Page, config.debounce()),
            home_view: HomeView::new(),
            discover_view: DiscoverView::new(config.page_size),
            trending_view: TrendingView::new(),
            course_view: CourseView::new(),
            watchlist_view: WatchlistView::new(),
            commander: Commander::new(),
            status: None,
            persist_config: true,
            paint_terminal_bg: false,
            config,
        }
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error if
/// any part of the execution fails.
fn main() -> Result<()> {
    let config = config::load_config();

    let _log_guard = logging::init(&config.data_dir()?).context("Failed to initialise logging")?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting");

    let (event_tx, event_rx) = mpsc::channel();
    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, event_tx, event_rx, task_tx);

    let mut terminal = setup_terminal(&mut app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    if let Err(e) = &res {
        tracing::error!("application error: {e:#}");
    }
    res.context("Application error occurred")
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &mut App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    if let Some(hex) = Theme::to_hex(app.theme.background_colour) {
        app.paint_terminal_bg = util::term::set_terminal_bg(&hex).is_ok();
    }

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is "best-effort" and does not return a result, as it is
/// typically called during cleanup.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg().ok();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A pool of task workers to process asynchronous [`AppTask`]s.
/// * An input thread to poll for system keyboard events.
/// * A tick thread that drives debounced searches and toast expiry.
///
/// After spawning the workers, it requests the initial data and hands control
/// to [`process_events`] to manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    tasks::spawn_task_workers(&app.config, task_rx, app.event_tx.clone())?;

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                if tx_keys.send(AppEvent::Key(key)).is_err() {
                    break;
                }
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    let tick_rate = app.config.tick_rate();
    thread::spawn(move || {
        while tx_tick.send(AppEvent::Tick).is_ok() {
            thread::sleep(tick_rate);
        }
    });

    app.task_tx.send(AppTask::LoadHistory)?;
    apply_route(app)?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};
    use rusqlite::Connection;

    use super::*;
    use crate::{
        api::{CourseBackend, local::LocalBackend},
        components::search::ResultRow,
        events::{FilterCommand, Mutation, SUBMISSION_FAILED, handle_event},
        model::{SearchCategory, search::SearchQuery},
        route::Route,
        tasks::{TaskContext, handle_task},
    };

    /// The application wired to an in-memory catalogue, with tasks run on the
    /// test thread.
    struct Harness {
        app: App,
        task_rx: Receiver<AppTask>,
        config: AppConfig,
        backend: LocalBackend,
        conn: Connection,
    }

    impl Harness {
        fn new() -> Self {
            Self::with_config(AppConfig::default())
        }

        fn signed_in(username: &str) -> Self {
            Self::with_config(AppConfig {
                username: Some(username.to_string()),
                ..AppConfig::default()
            })
        }

        fn with_config(config: AppConfig) -> Self {
            let (event_tx, event_rx) = mpsc::channel();
            let (task_tx, task_rx) = mpsc::channel();

            let mut app = App::new(config.clone(), event_tx, event_rx, task_tx);
            app.persist_config = false;

            Self {
                app,
                task_rx,
                config,
                backend: LocalBackend::open_in_memory().unwrap(),
                conn: db::init_memory_db().unwrap(),
            }
        }

        /// Runs pending tasks and events until both queues are empty.
        fn settle(&mut self) {
            loop {
                let mut idle = true;

                while let Ok(task) = self.task_rx.try_recv() {
                    idle = false;
                    let mut ctx = TaskContext {
                        config: &self.config,
                        event_tx: &self.app.event_tx,
                        backend: &self.backend,
                        conn: &mut self.conn,
                    };
                    handle_task(task, &mut ctx).unwrap();
                }

                while let Ok(event) = self.app.event_rx.try_recv() {
                    idle = false;
                    assert!(handle_event(&mut self.app, event).unwrap());
                }

                if idle {
                    break;
                }
            }
        }

        fn send(&mut self, event: AppEvent) {
            assert!(handle_event(&mut self.app, event).unwrap());
        }

        fn navigate(&mut self, route: Route) {
            self.send(AppEvent::Navigate(route));
            self.settle();
        }

        fn press(&mut self, code: KeyCode) {
            self.send(AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        }

        fn type_text(&mut self, text: &str) {
            for c in text.chars() {
                self.press(KeyCode::Char(c));
            }
        }

        fn command(&mut self, command: &str) {
            self.press(KeyCode::Char(':'));
            self.type_text(command);
            self.press(KeyCode::Enter);
            self.settle();
        }

        fn path(&self) -> String {
            self.app.navigator.current().path()
        }

        fn render(&mut self) -> String {
            let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
            terminal.draw(|f| render::draw(f, &mut self.app)).unwrap();
            terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .map(|cell| cell.symbol())
                .collect()
        }
    }

    #[test]
    fn search_command_opens_the_results_page() {
        let mut h = Harness::new();
        h.command("search t");

        assert_eq!(h.app.main_view, MainView::Search);
        assert!(h.path().starts_with("/search/courses?q=t"));

        let coordinator = &h.app.search_page.coordinator;
        assert!(!coordinator.is_loading_search(&h.app.search_cache));
        assert!(coordinator.data_count(&h.app.search_cache) > 0);
        assert_eq!(h.app.search_page.input_value(), "t");
    }

    #[test]
    fn quick_search_leads_to_the_results_page() {
        let mut h = Harness::new();
        h.press(KeyCode::Char('/'));
        h.settle();

        h.type_text("t");
        h.press(KeyCode::Enter);
        h.settle();
        h.press(KeyCode::Enter);
        h.settle();
        assert_eq!(h.app.main_view, MainView::Home);
        assert_eq!(h.app.store.search.history.len(SearchCategory::Courses), 2);

        let rows = h
            .app
            .overlay
            .rows(&h.app.search_cache, &h.app.store.search.history);
        let view_results = rows
            .iter()
            .position(|row| matches!(row, ResultRow::ViewResults(_)))
            .unwrap();

        h.press(KeyCode::Down);
        for _ in 0..view_results {
            h.press(KeyCode::Char('j'));
        }
        h.press(KeyCode::Enter);
        h.settle();

        assert!(!h.app.store.ui.search_overlay_visible);
        assert_eq!(h.app.main_view, MainView::Search);
        assert!(h.path().starts_with("/search/courses?q=t"));
    }

    #[test]
    fn quick_search_opens_and_closes() {
        let mut h = Harness::new();
        h.settle();

        h.press(KeyCode::Char('/'));
        h.settle();
        assert!(h.app.store.ui.search_overlay_visible);

        // Keys go to the overlay input, not the global bindings
        h.type_text("q1");
        h.settle();
        assert_eq!(h.app.overlay.input_value(), "q1");
        assert_eq!(h.app.main_view, MainView::Home);

        h.press(KeyCode::Esc);
        assert!(!h.app.store.ui.search_overlay_visible);
    }

    #[test]
    fn debounced_preview_fetches_without_history() {
        let mut h = Harness::with_config(AppConfig {
            debounce_ms: 0,
            ..AppConfig::default()
        });
        h.navigate(Route::Search {
            category: SearchCategory::Courses,
            query: None,
        });

        h.type_text("math");
        h.send(AppEvent::Tick);
        h.settle();

        let current = h.app.search_page.coordinator.current().clone();
        assert_eq!(current.q, "math");
        assert!(h.app.search_cache.get(&current).is_some());
        assert_eq!(h.app.store.search.history.len(SearchCategory::Courses), 0);
        assert_eq!(h.path(), "/search/courses");
    }

    #[test]
    fn submitted_search_is_recorded_in_history() {
        let mut h = Harness::new();
        h.navigate(Route::Search {
            category: SearchCategory::Courses,
            query: None,
        });

        h.type_text("algorithms");
        h.press(KeyCode::Enter);
        h.settle();

        assert!(h.path().starts_with("/search/courses?q=algorithms"));
        assert_eq!(
            h.app.store.search.history.recent(SearchCategory::Courses),
            vec!["algorithms"]
        );
    }

    #[test]
    fn empty_submit_is_recorded_but_not_listed() {
        let mut h = Harness::new();
        h.navigate(Route::Search {
            category: SearchCategory::Courses,
            query: None,
        });

        h.press(KeyCode::Enter);
        h.settle();

        let history = &h.app.store.search.history;
        assert_eq!(history.len(SearchCategory::Courses), 1);
        assert!(h.app.search_page.rows(&h.app.search_cache, history).is_empty());
    }

    #[test]
    fn bookmarked_page_past_the_end_is_corrected() {
        let mut h = Harness::new();
        h.command("search mh");
        h.navigate(Route::search(&SearchQuery::new("mh", 99, SearchCategory::Courses)));

        let current = h.app.search_page.coordinator.current().clone();
        assert!(current.page < 99);
        assert_eq!(h.path(), Route::search(&current).path());
        assert!(h.app.search_cache.get(&current).is_some());
    }

    #[test]
    fn discover_list_filters_by_tag() {
        let mut h = Harness::new();
        h.press(KeyCode::Char('2'));
        h.settle();
        assert_eq!(h.app.main_view, MainView::Discover);

        h.navigate(Route::DiscoverList("all".into()));
        h.send(AppEvent::Filter(FilterCommand::Faculty("SPMS".into())));
        h.send(AppEvent::Filter(FilterCommand::Tag("sequences".into())));

        let codes: Vec<&str> = h
            .app
            .discover_view
            .filter()
            .filtered()
            .iter()
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(codes, vec!["MH1811", "MH1812"]);
    }

    #[test]
    fn filter_outside_a_list_reports_status() {
        let mut h = Harness::new();
        h.send(AppEvent::Filter(FilterCommand::Clear));
        assert!(h.app.status.is_some());
    }

    #[test]
    fn course_page_renders_details() {
        let mut h = Harness::new();
        h.command("open mh1811");

        assert_eq!(h.path(), "/course/MH1811");
        assert_eq!(h.app.course_view.title(), Some("Mathematics 2"));
        assert!(h.render().contains("Mathematics 2"));
    }

    #[test]
    fn unknown_course_is_not_found() {
        let mut h = Harness::new();
        h.navigate(Route::course("ZZ9999"));
        assert!(h.app.course_view.is_not_found());
    }

    #[test]
    fn like_requires_sign_in() {
        let mut h = Harness::new();
        h.navigate(Route::course("MH1811"));

        h.press(KeyCode::Char('l'));
        assert!(h.app.commander.active());
        assert_eq!(h.app.commander.input.value(), "signin ");
        assert!(!h.app.store.user.is_liked("MH1811"));
    }

    #[test]
    fn like_updates_before_the_reply() {
        let mut h = Harness::signed_in("ada");
        h.navigate(Route::course("MH1811"));
        assert_eq!(h.app.course_view.likes(), Some(0));

        h.press(KeyCode::Char('l'));
        assert!(h.app.store.user.is_liked("MH1811"));
        assert_eq!(h.app.course_view.likes(), Some(1));

        h.settle();
        assert!(h.backend.is_liked("ada", "MH1811").unwrap());
    }

    #[test]
    fn failed_like_rolls_back() {
        let mut h = Harness::signed_in("ada");
        h.navigate(Route::course("MH1811"));
        let before = h.app.course_view.likes().unwrap();

        h.press(KeyCode::Char('l'));
        h.send(AppEvent::MutationFailed(Mutation::Like {
            code: "MH1811".into(),
            liked: true,
        }));

        assert!(!h.app.store.user.is_liked("MH1811"));
        assert_eq!(h.app.course_view.likes(), Some(before));
        let toast = h.app.store.ui.toast.as_ref().map(|t| t.message.as_str());
        assert_eq!(toast, Some(SUBMISSION_FAILED));
    }

    #[test]
    fn watchlist_follows_toggles() {
        let mut h = Harness::signed_in("ada");
        h.navigate(Route::course("SC3004"));
        h.press(KeyCode::Char('w'));
        h.settle();

        h.press(KeyCode::Char('5'));
        h.settle();
        assert_eq!(h.app.main_view, MainView::Watchlist);

        let watchlist = h.app.store.user.watchlist.ready().unwrap();
        assert!(watchlist.iter().any(|c| c.code == "SC3004"));
    }

    #[test]
    fn sign_in_and_out() {
        let mut h = Harness::new();
        h.command("signin grace");
        assert_eq!(
            h.app.store.user.user.as_ref().map(|u| u.username.as_str()),
            Some("grace")
        );
        assert_eq!(h.app.config.username.as_deref(), Some("grace"));

        h.command("signout");
        assert!(!h.app.store.user.is_signed_in());
        assert_eq!(h.app.config.username, None);
    }

    #[test]
    fn back_returns_to_previous_route() {
        let mut h = Harness::new();
        h.navigate(Route::Watchlist);
        h.navigate(Route::Discover);

        h.press(KeyCode::Char('b'));
        h.settle();
        assert_eq!(h.app.navigator.current(), &Route::Watchlist);
        assert_eq!(h.app.main_view, MainView::Watchlist);
    }

    #[test]
    fn quit_key_exits() {
        let mut h = Harness::new();
        h.press(KeyCode::Char('q'));

        let event = h.app.event_rx.try_recv().unwrap();
        assert!(!handle_event(&mut h.app, event).unwrap());
    }
}
