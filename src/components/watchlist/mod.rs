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

//! The signed-in user's watchlist.

mod render;

use crossterm::event::{Event, KeyCode};

use crate::{
    components::{CourseTable, CourseTableAction, ViewAction},
    model::{Course, Remote},
    route::Route,
};

#[derive(Default)]
pub(crate) struct WatchlistView {
    signed_in: bool,
    watchlist: Remote<Vec<Course>>,
    table: CourseTable,
}

impl WatchlistView {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Copies the user's watchlist state into the view.
    pub(crate) fn sync(&mut self, signed_in: bool, watchlist: &Remote<Vec<Course>>) {
        self.signed_in = signed_in;
        if *watchlist != self.watchlist {
            self.watchlist = watchlist.clone();
            self.table
                .set_courses(watchlist.ready().cloned().unwrap_or_default());
        }
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<ViewAction> {
        let Event::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Char('r') if matches!(self.watchlist, Remote::Failed) => Some(ViewAction::Retry),
            _ => match self.table.process_event(event)? {
                CourseTableAction::Open(code) => Some(ViewAction::Navigate(Route::course(&code))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn course(code: &str) -> Course {
        serde_json::from_value(serde_json::json!({ "code": code })).unwrap()
    }

    #[test]
    fn opens_watchlisted_course() {
        let mut view = WatchlistView::new();
        view.sync(true, &Remote::Ready(vec![course("SC3004")]));

        assert_eq!(
            view.process_event(&Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))),
            Some(ViewAction::Navigate(Route::course("SC3004")))
        );
    }

    #[test]
    fn sync_keeps_selection_when_unchanged() {
        let mut view = WatchlistView::new();
        let watchlist = Remote::Ready(vec![course("MH1810"), course("MH1811")]);
        view.sync(true, &watchlist);
        view.process_event(&Event::Key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE)));
        view.sync(true, &watchlist);

        assert_eq!(view.table.selected_course().map(|c| c.code.as_str()), Some("MH1811"));
    }
}
