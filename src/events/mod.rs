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

//! Application events and the main event loop.
//!
//! Every change to application state starts as an [`AppEvent`]: key presses
//! and ticks from the input threads, results from the task workers, and
//! requests from the command line. Events are handled one at a time on the
//! main thread, after which the UI is redrawn.
//!
//! # Organization
//!
//! * `handlers`: per-event state changes, routing and task dispatch.
//! * `key_handlers`: keyboard routing to the command line, the search
//!   overlay, the active view and finally the global keys.

mod handlers;
mod key_handlers;

use std::{io::Stdout, time::Instant};

use anyhow::{Result, bail};
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    model::{
        Course, CourseList, Review, TrendingCourses,
        search::{SearchKey, SearchResultPage},
    },
    render::draw,
    route::Route,
    search::history::HistoryEntry,
};

pub(crate) use handlers::{SUBMISSION_FAILED, apply_route};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),
    Tick,

    Navigate(Route),
    Back,
    ShowSearchOverlay,

    SignIn(String),
    SignOut,
    ToggleTheme,
    Filter(FilterCommand),

    HistoryLoaded(Vec<HistoryEntry>),
    SearchResults(SearchKey, Result<SearchResultPage, String>),
    DiscoverLoaded(Result<Vec<CourseList>, String>),
    TrendingLoaded(Result<TrendingCourses, String>),
    AllCoursesLoaded(Result<Vec<Course>, String>),
    CourseLoaded(String, Result<Option<Course>, String>),
    ReviewsLoaded(String, Result<Vec<Review>, String>),
    CourseStatus {
        code: String,
        liked: bool,
        watchlisted: bool,
    },
    WatchlistLoaded(Result<Vec<Course>, String>),

    MutationFailed(Mutation),
    ReviewSubmitted(String),

    ExitApplication,

    Error(String),
    FatalError(String),
}

/// A write that was rejected by the backend, carrying what is needed to roll
/// back the optimistic update.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Mutation {
    Like { code: String, liked: bool },
    Watchlist { code: String, watchlisted: bool },
    Review(Review),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterCommand {
    Faculty(String),
    Tag(String),
    Clear,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if !handle_event(app, event)? {
            break;
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies one event to the application state.
///
/// Returns `false` when the application should exit.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<bool> {
    let now = Instant::now();

    match event {
        AppEvent::ExitApplication => return Ok(false),
        AppEvent::FatalError(message) => bail!(message),

        AppEvent::Key(key) => key_handlers::process_key_event(app, key, now)?,
        AppEvent::Tick => handlers::handle_tick(app, now)?,

        AppEvent::Navigate(route) => handlers::navigate(app, route)?,
        AppEvent::Back => handlers::go_back(app)?,
        AppEvent::ShowSearchOverlay => handlers::show_search_overlay(app),

        AppEvent::SignIn(username) => handlers::handle_sign_in(app, &username, now)?,
        AppEvent::SignOut => handlers::handle_sign_out(app, now),
        AppEvent::ToggleTheme => handlers::handle_toggle_theme(app),
        AppEvent::Filter(command) => handlers::handle_filter(app, command),

        AppEvent::HistoryLoaded(entries) => handlers::handle_history_loaded(app, entries),
        AppEvent::SearchResults(key, result) => {
            handlers::handle_search_results(app, key, result, now)?
        }
        AppEvent::DiscoverLoaded(result) => app.discover_view.set_lists(result),
        AppEvent::TrendingLoaded(result) => handlers::handle_trending_loaded(app, result),
        AppEvent::AllCoursesLoaded(result) => app.discover_view.set_all_courses(result),
        AppEvent::CourseLoaded(code, result) => app.course_view.set_course(&code, result),
        AppEvent::ReviewsLoaded(code, result) => app.course_view.set_reviews(&code, result),
        AppEvent::CourseStatus {
            code,
            liked,
            watchlisted,
        } => handlers::handle_course_status(app, code, liked, watchlisted),
        AppEvent::WatchlistLoaded(result) => handlers::handle_watchlist_loaded(app, result),

        AppEvent::MutationFailed(mutation) => handlers::handle_mutation_failed(app, mutation, now)?,
        AppEvent::ReviewSubmitted(code) => handlers::handle_review_submitted(app, &code, now),

        AppEvent::Error(message) => handlers::handle_error(app, message),
    }

    handlers::sync_views(app);

    Ok(true)
}
