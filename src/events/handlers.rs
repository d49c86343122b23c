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

use std::time::Instant;

use anyhow::Result;

use crate::{
    App, MainView,
    components::ViewAction,
    config,
    events::{FilterCommand, Mutation},
    model::{
        Course, SearchCategory, TrendingCourses, User,
        search::{SearchKey, SearchQuery, SearchResultPage},
    },
    route::Route,
    search::{coordinator::SubmitOutcome, history::HistoryEntry},
    store::{SearchAction, UiAction, UserAction},
    tasks::AppTask,
    theme::Theme,
    util,
};

pub(crate) const SUBMISSION_FAILED: &str = "Submission failed, please try again";

pub(super) fn handle_tick(app: &mut App, now: Instant) -> Result<()> {
    if let Some(key) = app.overlay.coordinator.poll_debounce(&mut app.search_cache, now) {
        app.task_tx.send(AppTask::Search(key))?;
    }

    if let Some(key) = app.search_page.coordinator.poll_debounce(&mut app.search_cache, now) {
        app.task_tx.send(AppTask::Search(key))?;
    }

    app.store.dispatch(UiAction::ExpireToast(now));

    Ok(())
}

pub(super) fn navigate(app: &mut App, route: Route) -> Result<()> {
    close_search_overlay(app);
    app.navigator.navigate(route);
    apply_route(app)
}

pub(super) fn replace_route(app: &mut App, route: Route) -> Result<()> {
    app.navigator.replace(route);
    apply_route(app)
}

pub(super) fn go_back(app: &mut App) -> Result<()> {
    if app.navigator.back().is_some() {
        apply_route(app)?;
    }

    Ok(())
}

/// Brings the views in line with the current route and requests whatever
/// data they are missing.
pub(crate) fn apply_route(app: &mut App) -> Result<()> {
    let route = app.navigator.current().clone();
    let main_view = route.main_view();

    if main_view == MainView::Search && app.main_view != MainView::Search {
        app.search_page.focus_input();
    }
    app.main_view = main_view;

    match route {
        Route::Home => ensure_trending(app)?,
        Route::Discover => {
            app.discover_view.select(None);
            ensure_discover(app)?;
        }
        Route::DiscoverList(slug) => {
            app.discover_view.select(Some(slug.as_str()));
            ensure_discover(app)?;
        }
        Route::Trending(period) => {
            app.trending_view.set_period(period);
            ensure_trending(app)?;
        }
        Route::Search { category, query } => {
            let query = query.unwrap_or_else(|| SearchQuery::new("", 1, category));
            sync_search_page(app, query)?;
        }
        Route::Course { code, tab } => {
            if app.course_view.load(&code, tab) {
                app.task_tx.send(AppTask::GetCourse(code.clone()))?;
                if let Some(user) = &app.store.user.user {
                    app.task_tx.send(AppTask::GetCourseStatus {
                        user_id: user.id.clone(),
                        code: code.clone(),
                    })?;
                }
            }
            if app.course_view.needs_reviews() {
                app.course_view.reviews_loading();
                app.task_tx.send(AppTask::GetReviews(code))?;
            }
        }
        Route::Watchlist => ensure_watchlist(app)?,
    }

    Ok(())
}

fn ensure_trending(app: &mut App) -> Result<()> {
    if app.trending_view.needs_fetch() {
        app.trending_view.loading();
        app.task_tx.send(AppTask::GetTrending)?;
    }

    Ok(())
}

fn ensure_discover(app: &mut App) -> Result<()> {
    if app.discover_view.needs_lists() {
        app.discover_view.lists_loading();
        app.task_tx.send(AppTask::GetDiscover)?;
    }

    if app.discover_view.needs_all_courses() {
        app.discover_view.all_courses_loading();
        app.task_tx.send(AppTask::GetAllCourses)?;
    }

    Ok(())
}

fn ensure_watchlist(app: &mut App) -> Result<()> {
    let Some(user) = &app.store.user.user else {
        return Ok(());
    };

    if app.store.user.watchlist.needs_fetch() {
        let user_id = user.id.clone();
        app.store.dispatch(UserAction::WatchlistLoading);
        app.task_tx.send(AppTask::GetWatchlist(user_id))?;
    }

    Ok(())
}

/// Reads the query from the search route into the search page.
fn sync_search_page(app: &mut App, query: SearchQuery) -> Result<()> {
    let now = Instant::now();
    let coordinator = &mut app.search_page.coordinator;

    if query == *coordinator.current() {
        if let Some(key) = coordinator.refresh(&mut app.search_cache, now) {
            app.task_tx.send(AppTask::Search(key))?;
        }
        return Ok(());
    }

    let sync = coordinator.sync_from_location(query, &mut app.search_cache, now);
    app.search_page.sync_input();

    if let Some(key) = sync.fetch {
        app.task_tx.send(AppTask::Search(key))?;
    }
    if let Some(route) = sync.replace_route {
        app.navigator.replace(route);
    }

    Ok(())
}

pub(super) fn show_search_overlay(app: &mut App) {
    app.overlay.focus_input();
    app.store.dispatch(UiAction::ShowSearchOverlay);
}

fn close_search_overlay(app: &mut App) {
    if app.store.ui.search_overlay_visible {
        app.overlay.focus_input();
        app.store.dispatch(UiAction::HideSearchOverlay);
    }
}

/// Carries out what a view asked for.
pub(super) fn apply_view_action(app: &mut App, action: ViewAction, now: Instant) -> Result<()> {
    match action {
        ViewAction::Navigate(route) => navigate(app, route)?,
        ViewAction::ReplaceRoute(route) => replace_route(app, route)?,
        ViewAction::CloseOverlay => close_search_overlay(app),

        ViewAction::Fetch(key) => app.task_tx.send(AppTask::Search(key))?,
        ViewAction::Submitted(outcome) => handle_submitted(app, outcome)?,
        ViewAction::ClearHistory(category) => handle_clear_history(app, category)?,

        ViewAction::ToggleLike(code) => toggle_like(app, code, now)?,
        ViewAction::ToggleWatchlist(code) => toggle_watchlist(app, code, now)?,
        ViewAction::ComposeReview => {
            if require_user(app, now).is_some() {
                app.course_view.open_form();
            }
        }
        ViewAction::SubmitReview(draft) => {
            if let Some(user) = require_user(app, now) {
                let review = draft.into_review(app.course_view.code(), &user.username);
                app.task_tx.send(AppTask::SubmitReview(review))?;
            }
        }

        ViewAction::Retry => apply_route(app)?,
    }

    Ok(())
}

fn handle_submitted(app: &mut App, outcome: SubmitOutcome) -> Result<()> {
    if let Some(key) = outcome.fetch {
        app.task_tx.send(AppTask::Search(key))?;
    }

    app.store.dispatch(SearchAction::AddHistory(outcome.history.clone()));
    app.task_tx.send(AppTask::RecordHistory(outcome.history))?;

    if let Some(route) = outcome.route {
        app.navigator.navigate(route);
        apply_route(app)?;
    }

    Ok(())
}

fn handle_clear_history(app: &mut App, category: SearchCategory) -> Result<()> {
    app.store.dispatch(SearchAction::ClearHistory(category));
    app.task_tx.send(AppTask::ClearHistory(category))?;

    Ok(())
}

/// The signed-in user, or `None` after opening the sign-in prompt.
fn require_user(app: &mut App, now: Instant) -> Option<User> {
    if let Some(user) = &app.store.user.user {
        return Some(user.clone());
    }

    tracing::debug!("sign-in required");
    app.commander.prompt("signin ");
    app.store
        .dispatch(UiAction::ShowToast("Sign in to continue".to_string(), now));
    None
}

fn toggle_like(app: &mut App, code: String, now: Instant) -> Result<()> {
    let Some(user) = require_user(app, now) else {
        return Ok(());
    };

    let liked = !app.store.user.is_liked(&code);
    app.store.dispatch(UserAction::SetLiked(code.clone(), liked));
    if app.course_view.code() == code {
        app.course_view.adjust_likes(if liked { 1 } else { -1 });
    }

    app.task_tx.send(AppTask::SetLike {
        user_id: user.id,
        code,
        liked,
    })?;

    Ok(())
}

fn toggle_watchlist(app: &mut App, code: String, now: Instant) -> Result<()> {
    let Some(user) = require_user(app, now) else {
        return Ok(());
    };

    let watchlisted = !app.store.user.is_watchlisted(&code);
    app.store
        .dispatch(UserAction::SetWatchlisted(code.clone(), watchlisted));
    if app.course_view.code() == code {
        app.course_view
            .adjust_watchlists(if watchlisted { 1 } else { -1 });
    }

    app.task_tx.send(AppTask::SetWatchlisted {
        user_id: user.id,
        code,
        watchlisted,
    })?;

    Ok(())
}

pub(super) fn handle_mutation_failed(app: &mut App, mutation: Mutation, now: Instant) -> Result<()> {
    match mutation {
        Mutation::Like { code, liked } => {
            app.store.dispatch(UserAction::SetLiked(code.clone(), !liked));
            if app.course_view.code() == code {
                app.course_view.adjust_likes(if liked { -1 } else { 1 });
            }
        }
        Mutation::Watchlist { code, watchlisted } => {
            app.store
                .dispatch(UserAction::SetWatchlisted(code.clone(), !watchlisted));
            if app.course_view.code() == code {
                app.course_view
                    .adjust_watchlists(if watchlisted { -1 } else { 1 });
            }
            if let Some(user) = &app.store.user.user {
                app.task_tx.send(AppTask::GetWatchlist(user.id.clone()))?;
            }
        }
        Mutation::Review(review) => app.course_view.review_failed(&review.course_code),
    }

    app.store
        .dispatch(UiAction::ShowToast(SUBMISSION_FAILED.to_string(), now));

    Ok(())
}

pub(super) fn handle_review_submitted(app: &mut App, code: &str, now: Instant) {
    app.course_view.review_submitted(code);
    app.store
        .dispatch(UiAction::ShowToast("Review submitted".to_string(), now));
}

pub(super) fn handle_sign_in(app: &mut App, username: &str, now: Instant) -> Result<()> {
    let user = User::from_username(username);
    let user_id = user.id.clone();
    app.store.dispatch(UserAction::SignIn(user));

    app.config.username = Some(username.to_string());
    persist_config(app);

    app.store.dispatch(UserAction::WatchlistLoading);
    app.task_tx.send(AppTask::GetWatchlist(user_id.clone()))?;

    if app.main_view == MainView::Course && !app.course_view.code().is_empty() {
        app.task_tx.send(AppTask::GetCourseStatus {
            user_id,
            code: app.course_view.code().to_string(),
        })?;
    }

    app.store
        .dispatch(UiAction::ShowToast(format!("Signed in as {username}"), now));

    Ok(())
}

pub(super) fn handle_sign_out(app: &mut App, now: Instant) {
    app.store.dispatch(UserAction::SignOut);
    app.config.username = None;
    persist_config(app);

    app.store
        .dispatch(UiAction::ShowToast("Signed out".to_string(), now));
}

fn persist_config(app: &App) {
    if !app.persist_config {
        return;
    }
    if let Err(e) = config::save_config(&app.config) {
        tracing::warn!("failed to save configuration: {e}");
    }
}

pub(super) fn handle_toggle_theme(app: &mut App) {
    app.store.dispatch(UiAction::ToggleTheme);
    app.theme = Theme::for_mode(app.store.ui.theme);

    if app.paint_terminal_bg
        && let Some(hex) = Theme::to_hex(app.theme.background_colour)
    {
        util::term::set_terminal_bg(&hex).ok();
    }
}

pub(super) fn handle_filter(app: &mut App, command: FilterCommand) {
    if app.main_view != MainView::Discover || app.discover_view.selected_slug().is_none() {
        app.status = Some("Open a course list to filter it".to_string());
        return;
    }

    match command {
        FilterCommand::Faculty(name) => app.discover_view.toggle_faculty(&name),
        FilterCommand::Tag(name) => app.discover_view.toggle_tag(&name),
        FilterCommand::Clear => app.discover_view.clear_filters(),
    }
}

pub(super) fn handle_history_loaded(app: &mut App, entries: Vec<HistoryEntry>) {
    tracing::debug!(count = entries.len(), "search history loaded");
    app.store.dispatch(SearchAction::LoadHistory(entries));
}

pub(super) fn handle_search_results(
    app: &mut App,
    key: SearchKey,
    result: Result<SearchResultPage, String>,
    now: Instant,
) -> Result<()> {
    let coordinator = &mut app.search_page.coordinator;
    let current = coordinator.apply_results(&key, result, &mut app.search_cache, now);

    tracing::debug!(q = %key.q, page = key.page, current, "search results stored");

    if !current {
        return Ok(());
    }
    let Some(sync) = coordinator.clamp_page(&mut app.search_cache, now) else {
        return Ok(());
    };

    if let Some(key) = sync.fetch {
        app.task_tx.send(AppTask::Search(key))?;
    }
    if let Some(route) = sync.replace_route {
        app.navigator.replace(route);
    }

    Ok(())
}

pub(super) fn handle_trending_loaded(app: &mut App, result: Result<TrendingCourses, String>) {
    if let Ok(trending) = &result {
        app.home_view.set_trending(trending);
    }
    app.trending_view.set_trending(result);
}

pub(super) fn handle_course_status(app: &mut App, code: String, liked: bool, watchlisted: bool) {
    if !app.store.user.is_signed_in() {
        return;
    }
    app.store.dispatch(UserAction::SetLiked(code.clone(), liked));
    app.store
        .dispatch(UserAction::SetWatchlisted(code, watchlisted));
}

pub(super) fn handle_watchlist_loaded(app: &mut App, result: Result<Vec<Course>, String>) {
    if !app.store.user.is_signed_in() {
        return;
    }
    match result {
        Ok(courses) => app.store.dispatch(UserAction::SetWatchlist(courses)),
        Err(e) => {
            tracing::warn!("watchlist failed to load: {e}");
            app.store.dispatch(UserAction::WatchlistFailed);
        }
    }
}

pub(super) fn handle_error(app: &mut App, message: String) {
    tracing::warn!("{message}");
    app.status = Some(message);
}

/// Copies store state that views render from.
pub(super) fn sync_views(app: &mut App) {
    let user = &app.store.user;
    app.watchlist_view
        .sync(user.is_signed_in(), &user.watchlist);

    let code = app.course_view.code();
    let (liked, watchlisted) = (user.is_liked(code), user.is_watchlisted(code));
    app.course_view.set_marks(liked, watchlisted);
}
