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

//! Application store.
//!
//! Shared application state lives in an [`AppStore`] owned by the main thread
//! and passed by reference to whatever needs it. State changes only through
//! [`AppStore::dispatch`], which routes each [`Action`] to the reducer of the
//! slice it belongs to.

mod search;
mod ui;
mod user;

pub(crate) use search::{SearchAction, SearchState};
pub(crate) use ui::{ThemeMode, Toast, UiAction, UiState};
pub(crate) use user::{UserAction, UserState};

#[derive(Debug, Clone)]
pub(crate) enum Action {
    Search(SearchAction),
    Ui(UiAction),
    User(UserAction),
}

impl From<SearchAction> for Action {
    fn from(action: SearchAction) -> Self {
        Action::Search(action)
    }
}

impl From<UiAction> for Action {
    fn from(action: UiAction) -> Self {
        Action::Ui(action)
    }
}

impl From<UserAction> for Action {
    fn from(action: UserAction) -> Self {
        Action::User(action)
    }
}

#[derive(Debug, Default)]
pub(crate) struct AppStore {
    pub(crate) search: SearchState,
    pub(crate) ui: UiState,
    pub(crate) user: UserState,
}

impl AppStore {
    pub(crate) fn new(history_limit: usize) -> Self {
        Self {
            search: SearchState::new(history_limit),
            ui: UiState::default(),
            user: UserState::default(),
        }
    }

    pub(crate) fn dispatch(&mut self, action: impl Into<Action>) {
        let action = action.into();
        tracing::trace!(?action, "dispatch");

        match action {
            Action::Search(action) => self.search.reduce(action),
            Action::Ui(action) => self.ui.reduce(action),
            Action::User(action) => self.user.reduce(action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::SearchCategory, search::history::HistoryEntry};

    #[test]
    fn dispatch_routes_to_slices() {
        let mut store = AppStore::new(10);

        store.dispatch(SearchAction::AddHistory(HistoryEntry {
            category: SearchCategory::Courses,
            q: "t".into(),
        }));
        store.dispatch(UiAction::ToggleTheme);

        assert_eq!(store.search.history.len(SearchCategory::Courses), 1);
        assert_eq!(store.ui.theme, ThemeMode::Light);
        assert!(store.user.user.is_none());
    }
}
