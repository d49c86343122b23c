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

use std::collections::HashMap;

use crate::model::{Course, Remote, User};

#[derive(Debug, Clone)]
pub(crate) enum UserAction {
    SignIn(User),
    SignOut,
    SetLiked(String, bool),
    SetWatchlisted(String, bool),
    WatchlistLoading,
    SetWatchlist(Vec<Course>),
    WatchlistFailed,
}

#[derive(Debug, Default)]
pub(crate) struct UserState {
    pub(crate) user: Option<User>,
    pub(crate) liked: HashMap<String, bool>,
    pub(crate) watchlisted: HashMap<String, bool>,
    pub(crate) watchlist: Remote<Vec<Course>>,
}

impl UserState {
    pub(crate) fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub(crate) fn is_liked(&self, code: &str) -> bool {
        self.liked.get(code).copied().unwrap_or(false)
    }

    pub(crate) fn is_watchlisted(&self, code: &str) -> bool {
        self.watchlisted.get(code).copied().unwrap_or(false)
    }

    pub(super) fn reduce(&mut self, action: UserAction) {
        match action {
            UserAction::SignIn(user) => {
                tracing::info!(username = %user.username, "signed in");
                *self = UserState {
                    user: Some(user),
                    ..UserState::default()
                };
            }
            UserAction::SignOut => *self = UserState::default(),
            UserAction::SetLiked(code, liked) => {
                self.liked.insert(code, liked);
            }
            UserAction::SetWatchlisted(code, watchlisted) => {
                if !watchlisted {
                    if let Remote::Ready(courses) = &mut self.watchlist {
                        courses.retain(|c| c.code != code);
                    }
                }
                self.watchlisted.insert(code, watchlisted);
            }
            UserAction::WatchlistLoading => self.watchlist = Remote::Loading,
            UserAction::SetWatchlist(courses) => {
                for course in &courses {
                    self.watchlisted.insert(course.code.clone(), true);
                }
                self.watchlist = Remote::Ready(courses);
            }
            UserAction::WatchlistFailed => self.watchlist = Remote::Failed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_out_forgets_user_state() {
        let mut state = UserState::default();
        state.reduce(UserAction::SignIn(User::from_username("roland")));
        state.reduce(UserAction::SetLiked("MH1811".into(), true));
        assert!(state.is_liked("MH1811"));

        state.reduce(UserAction::SignOut);
        assert!(!state.is_signed_in());
        assert!(!state.is_liked("MH1811"));
    }

    #[test]
    fn removing_from_watchlist_updates_listing() {
        let mut state = UserState::default();
        let course: Course = serde_json::from_value(serde_json::json!({ "code": "SC3004" })).unwrap();
        state.reduce(UserAction::SetWatchlist(vec![course]));
        assert!(state.is_watchlisted("SC3004"));

        state.reduce(UserAction::SetWatchlisted("SC3004".into(), false));
        assert_eq!(state.watchlist.ready().map(Vec::len), Some(0));
    }
}
