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

//! Command-line input logic and state management.
//!
//! This module implements a `:` command line on top of a text input
//! component. When a command is submitted it is parsed and the matching
//! [`AppEvent`] is sent to the application.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    events::{AppEvent, FilterCommand},
    model::{SearchCategory, search::SearchQuery},
    route::Route,
};

#[derive(Default)]
pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Opens the command line with `text` already typed.
    pub(crate) fn prompt(&mut self, text: &str) {
        self.active = true;
        self.input = Input::new(text.to_string());
    }

    /// Returns true when the event was consumed by the command line.
    pub(crate) fn handle_event(&mut self, event: &Event, event_tx: &Sender<AppEvent>) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.active = false;
                self.input.reset();
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.active = false;
                self.input.reset();
                if !buffer.is_empty() {
                    run_command(&buffer, event_tx)?;
                }
            }

            // Delegate all other key events to the managed input component
            _ => {
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

fn run_command(buffer: &str, event_tx: &Sender<AppEvent>) -> Result<()> {
    tracing::debug!(command = buffer, "run command");

    let parts: Vec<&str> = buffer.split_whitespace().collect();

    let event = match parts.as_slice() {
        ["q"] | ["quit"] => AppEvent::ExitApplication,

        ["search"] => AppEvent::ShowSearchOverlay,
        ["search", first, rest @ ..] => {
            let (category, words) = match first.parse::<SearchCategory>() {
                Ok(category) if !rest.is_empty() => (category, rest),
                _ => (SearchCategory::default(), &parts[1..]),
            };
            let query = SearchQuery::new(words.join(" "), 1, category);
            AppEvent::Navigate(Route::search(&query))
        }

        ["open", code] => AppEvent::Navigate(Route::course(&code.to_uppercase())),

        ["home"] => AppEvent::Navigate(Route::Home),
        ["discover"] => AppEvent::Navigate(Route::Discover),
        ["discover", slug] => AppEvent::Navigate(Route::DiscoverList(slug.to_string())),
        ["trending"] => AppEvent::Navigate(Route::Trending(Default::default())),
        ["trending", period] => AppEvent::Navigate(Route::parse(&format!("/trending/{period}"))),
        ["watchlist"] => AppEvent::Navigate(Route::Watchlist),
        ["go", path] => AppEvent::Navigate(Route::parse(path)),
        ["back"] => AppEvent::Back,

        ["signin", name] => AppEvent::SignIn(name.to_string()),
        ["signout"] => AppEvent::SignOut,

        ["theme"] => AppEvent::ToggleTheme,

        ["filter", "faculty", name @ ..] if !name.is_empty() => {
            AppEvent::Filter(FilterCommand::Faculty(name.join(" ")))
        }
        ["filter", "tag", name @ ..] if !name.is_empty() => {
            AppEvent::Filter(FilterCommand::Tag(name.join(" ")))
        }
        ["filter", "clear"] => AppEvent::Filter(FilterCommand::Clear),

        _ => AppEvent::Error(format!("Unknown command: {buffer}")),
    };

    event_tx.send(event)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::model::TrendPeriod;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn run(text: &str) -> AppEvent {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(commander.handle_event(&key(KeyCode::Char(':')), &tx).unwrap());
        for c in text.chars() {
            commander.handle_event(&key(KeyCode::Char(c)), &tx).unwrap();
        }
        commander.handle_event(&key(KeyCode::Enter), &tx).unwrap();

        assert!(!commander.active());
        rx.try_recv().unwrap()
    }

    #[test]
    fn inactive_commander_ignores_keys() {
        let (tx, _rx) = mpsc::channel();
        let mut commander = Commander::new();
        assert!(!commander.handle_event(&key(KeyCode::Char('q')), &tx).unwrap());
    }

    #[test]
    fn open_and_search_commands() {
        assert!(matches!(
            run("open mh1811"),
            AppEvent::Navigate(route) if route == Route::course("MH1811")
        ));
        assert!(matches!(
            run("search lists core modules"),
            AppEvent::Navigate(route)
                if route == Route::search(&SearchQuery::new("core modules", 1, SearchCategory::Lists))
        ));
        assert!(matches!(
            run("search linear algebra"),
            AppEvent::Navigate(route)
                if route == Route::search(&SearchQuery::new("linear algebra", 1, SearchCategory::Courses))
        ));
    }

    #[test]
    fn trending_period_falls_back() {
        assert!(matches!(
            run("trending year"),
            AppEvent::Navigate(Route::Trending(TrendPeriod::Year))
        ));
        assert!(matches!(
            run("trending decade"),
            AppEvent::Navigate(Route::Trending(TrendPeriod::ThreeMonths))
        ));
    }

    #[test]
    fn filter_commands() {
        assert!(matches!(
            run("filter faculty SPMS"),
            AppEvent::Filter(FilterCommand::Faculty(name)) if name == "SPMS"
        ));
        assert!(matches!(
            run("filter tag linear algebra"),
            AppEvent::Filter(FilterCommand::Tag(name)) if name == "linear algebra"
        ));
        assert!(matches!(run("filter clear"), AppEvent::Filter(FilterCommand::Clear)));
    }

    #[test]
    fn unknown_command_reports_error() {
        assert!(matches!(run("frobnicate"), AppEvent::Error(_)));
    }

    #[test]
    fn prompt_prefills_input() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        commander.prompt("signin ");
        for c in "roland".chars() {
            commander.handle_event(&key(KeyCode::Char(c)), &tx).unwrap();
        }
        commander.handle_event(&key(KeyCode::Enter), &tx).unwrap();

        assert!(matches!(rx.try_recv().unwrap(), AppEvent::SignIn(name) if name == "roland"));
    }
}
