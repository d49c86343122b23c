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
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    App, MainView,
    components::ViewAction,
    events::{AppEvent, handlers},
    model::{SearchCategory, TrendPeriod},
    route::Route,
};

/// Routes a key press.
///
/// The command line sees every key first. While the quick search overlay is
/// open it takes all remaining keys. Otherwise the active view gets the key,
/// and if it neither produced an action nor holds the keyboard the global
/// bindings apply.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent, now: Instant) -> Result<()> {
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    let event = Event::Key(key);
    if app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    if app.store.ui.search_overlay_visible {
        let action = app.overlay.process_event(
            &event,
            &mut app.search_cache,
            &app.store.search.history,
            now,
        );
        if let Some(action) = action {
            handlers::apply_view_action(app, action, now)?;
        }
        return Ok(());
    }

    if let Some(action) = process_view_event(app, &event, now) {
        return handlers::apply_view_action(app, action, now);
    }

    if !holds_keyboard(app) {
        process_global_key_event(app, key)?;
    }

    Ok(())
}

fn process_view_event(app: &mut App, event: &Event, now: Instant) -> Option<ViewAction> {
    match app.main_view {
        MainView::Home => app.home_view.process_event(event),
        MainView::Discover => app.discover_view.process_event(event),
        MainView::Trending => app.trending_view.process_event(event),
        MainView::Search => app.search_page.process_event(
            event,
            &mut app.search_cache,
            &app.store.search.history,
            now,
        ),
        MainView::Course => app.course_view.process_event(event),
        MainView::Watchlist => app.watchlist_view.process_event(event),
    }
}

/// Checked after the view has seen the key, since the key may have moved
/// focus in or out of a text field.
fn holds_keyboard(app: &App) -> bool {
    match app.main_view {
        MainView::Search => app.search_page.is_text_input(),
        MainView::Course => app.course_view.is_text_input(),
        _ => false,
    }
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = match key.code {
        KeyCode::Char('q') => AppEvent::ExitApplication,
        KeyCode::Char('/') => AppEvent::ShowSearchOverlay,

        KeyCode::Char('1') => AppEvent::Navigate(Route::Home),
        KeyCode::Char('2') => AppEvent::Navigate(Route::Discover),
        KeyCode::Char('3') => AppEvent::Navigate(Route::Trending(TrendPeriod::default())),
        KeyCode::Char('4') => AppEvent::Navigate(search_route(app)),
        KeyCode::Char('5') => AppEvent::Navigate(Route::Watchlist),

        KeyCode::Char('b') | KeyCode::Backspace => AppEvent::Back,
        KeyCode::Char('T') => AppEvent::ToggleTheme,

        _ => return Ok(()),
    };

    app.event_tx.send(event)?;
    Ok(())
}

/// The search page as it was last left.
fn search_route(app: &App) -> Route {
    let current = app.search_page.coordinator.current();
    if current.q.is_empty() {
        Route::Search {
            category: SearchCategory::default(),
            query: None,
        }
    } else {
        Route::search(current)
    }
}
