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

//! Event handling for the discover page.

use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{
    components::{
        CourseTableAction, ViewAction,
        discover::{ALL_COURSES_SLUG, DiscoverView, Facet, Focus},
        next_index, previous_index,
    },
    route::Route,
};

impl DiscoverView {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<ViewAction> {
        let Event::Key(key) = event else {
            return None;
        };

        if self.is_failed() && key.code == KeyCode::Char('r') {
            return Some(ViewAction::Retry);
        }

        if self.selected.is_none() {
            return self.process_overview_key(*key);
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Facets => Focus::Courses,
                    Focus::Courses => Focus::Facets,
                };
                None
            }
            KeyCode::Esc => Some(ViewAction::Navigate(Route::Discover)),
            KeyCode::Char('c') => {
                self.clear_filters();
                None
            }
            KeyCode::Char('[') => {
                self.previous_page();
                None
            }
            KeyCode::Char(']') => {
                self.next_page();
                None
            }
            _ => match self.focus {
                Focus::Facets => self.process_facet_key(*key),
                Focus::Courses => self.process_courses_key(event, *key),
            },
        }
    }

    /// Overview entries in display order: the whole catalog, then each list.
    pub(crate) fn overview_slugs(&self) -> Vec<&str> {
        std::iter::once(ALL_COURSES_SLUG)
            .chain(
                self.lists
                    .ready()
                    .into_iter()
                    .flatten()
                    .map(|list| list.slug.as_str()),
            )
            .collect()
    }

    fn process_overview_key(&mut self, key: KeyEvent) -> Option<ViewAction> {
        let len = self.overview_slugs().len();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.overview_state
                    .select(next_index(self.overview_state.selected(), len));
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.overview_state
                    .select(previous_index(self.overview_state.selected(), len));
                None
            }
            KeyCode::Enter => {
                let slugs = self.overview_slugs();
                let slug = slugs.get(self.overview_state.selected().unwrap_or(0))?;
                Some(ViewAction::Navigate(Route::DiscoverList(slug.to_string())))
            }
            _ => None,
        }
    }

    fn process_facet_key(&mut self, key: KeyEvent) -> Option<ViewAction> {
        let facets = self.facets();

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.facet_cursor = next_index(Some(self.facet_cursor), facets.len()).unwrap_or(0);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.facet_cursor =
                    previous_index(Some(self.facet_cursor), facets.len()).unwrap_or(0);
            }
            KeyCode::Enter | KeyCode::Char(' ') => match facets.get(self.facet_cursor) {
                Some(Facet::Faculty(faculty)) => self.toggle_faculty(faculty),
                Some(Facet::Tag(tag)) => self.toggle_tag(tag),
                None => {}
            },
            _ => {}
        }

        None
    }

    fn process_courses_key(&mut self, event: &Event, key: KeyEvent) -> Option<ViewAction> {
        match key.code {
            KeyCode::Left => {
                self.previous_page();
                None
            }
            KeyCode::Right => {
                self.next_page();
                None
            }
            _ => match self.table.process_event(event)? {
                CourseTableAction::Open(code) => Some(ViewAction::Navigate(Route::course(&code))),
            },
        }
    }

    fn next_page(&mut self) {
        if self.segmented.next() {
            self.sync_page();
        }
    }

    fn previous_page(&mut self) {
        if self.segmented.previous() {
            self.sync_page();
        }
    }
}
