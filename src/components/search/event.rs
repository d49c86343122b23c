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

//! Event handling for the search panel.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    components::{
        ViewAction, next_index, previous_index,
        search::{Focus, ResultRow, SearchMode, SearchPanel},
    },
    model::search::SearchQuery,
    route::Route,
    search::{
        coordinator::{SearchCache, SubmitOutcome},
        history::SearchHistory,
    },
};

impl SearchPanel {
    pub(crate) fn process_event(
        &mut self,
        event: &Event,
        cache: &mut SearchCache,
        history: &SearchHistory,
        now: Instant,
    ) -> Option<ViewAction> {
        let Event::Key(key) = event else {
            return None;
        };

        match self.focus {
            Focus::Input => self.process_input_key(event, *key, cache, history, now),
            Focus::Results => self.process_results_key(*key, cache, history, now),
        }
    }

    fn process_input_key(
        &mut self,
        event: &Event,
        key: KeyEvent,
        cache: &mut SearchCache,
        history: &SearchHistory,
        now: Instant,
    ) -> Option<ViewAction> {
        match key.code {
            KeyCode::Esc => match self.mode {
                SearchMode::Overlay => Some(ViewAction::CloseOverlay),
                SearchMode::Page
                    if self.input.value().is_empty() && self.coordinator.is_empty_query() =>
                {
                    // Nothing to clear, release the keyboard.
                    self.focus = Focus::Results;
                    None
                }
                SearchMode::Page => {
                    self.input.reset();
                    self.coordinator.reset().map(ViewAction::ReplaceRoute)
                }
            },

            KeyCode::Enter => {
                let values = SearchQuery::new(
                    self.input.value(),
                    1,
                    self.coordinator.draft().category,
                );
                let outcome = self.coordinator.submit(values, cache, now);
                Some(self.submitted(outcome))
            }

            KeyCode::Tab => {
                let category = self.coordinator.draft().category.next();
                let outcome = self.coordinator.select_category(category, cache, now);
                Some(self.submitted(outcome))
            }

            KeyCode::BackTab => {
                let category = self.coordinator.draft().category.previous();
                let outcome = self.coordinator.select_category(category, cache, now);
                Some(self.submitted(outcome))
            }

            KeyCode::Down => {
                if !self.rows(cache, history).is_empty() {
                    self.focus = Focus::Results;
                    self.list_state.select(Some(0));
                }
                None
            }

            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(event);
                if self.input.value() != before {
                    self.coordinator.set_draft(self.input.value(), now);
                }
                None
            }
        }
    }

    fn process_results_key(
        &mut self,
        key: KeyEvent,
        cache: &mut SearchCache,
        history: &SearchHistory,
        now: Instant,
    ) -> Option<ViewAction> {
        let rows = self.rows(cache, history);

        match key.code {
            KeyCode::Esc | KeyCode::Char('/') => {
                self.focus_input();
                None
            }

            KeyCode::Down | KeyCode::Char('j') => {
                self.list_state
                    .select(next_index(self.list_state.selected(), rows.len()));
                None
            }

            KeyCode::Up | KeyCode::Char('k') => {
                match self.list_state.selected() {
                    Some(0) | None => self.focus_input(),
                    selected => self.list_state.select(previous_index(selected, rows.len())),
                }
                None
            }

            KeyCode::Right | KeyCode::Char('l') if self.mode == SearchMode::Page => {
                let outcome = self.coordinator.next_page(cache, now)?;
                Some(self.submitted(outcome))
            }

            KeyCode::Left | KeyCode::Char('h') if self.mode == SearchMode::Page => {
                let outcome = self.coordinator.previous_page(cache, now)?;
                Some(self.submitted(outcome))
            }

            KeyCode::Char('r') => self.coordinator.revalidate(cache, now).map(ViewAction::Fetch),

            KeyCode::Char('X') if self.coordinator.is_empty_query() => {
                self.focus_input();
                Some(ViewAction::ClearHistory(self.coordinator.draft().category))
            }

            KeyCode::Enter => {
                let row = rows.get(self.list_state.selected()?)?.clone();
                self.open_row(row, cache, now)
            }

            _ => None,
        }
    }

    fn open_row(&mut self, row: ResultRow, cache: &mut SearchCache, now: Instant) -> Option<ViewAction> {
        match row {
            ResultRow::History(q) => {
                self.input = Input::new(q.clone());
                self.focus_input();
                let values = SearchQuery::new(q, 1, self.coordinator.draft().category);
                let outcome = self.coordinator.submit(values, cache, now);
                Some(self.submitted(outcome))
            }
            ResultRow::Entity(entity) => {
                if let Some(code) = entity.course_code() {
                    Some(ViewAction::Navigate(Route::course(code)))
                } else {
                    entity
                        .list_slug()
                        .map(|slug| ViewAction::Navigate(Route::DiscoverList(slug.to_string())))
                }
            }
            ResultRow::ViewResults(_) => {
                Some(ViewAction::Navigate(Route::search(self.coordinator.current())))
            }
        }
    }

    fn submitted(&mut self, outcome: SubmitOutcome) -> ViewAction {
        if self.focus == Focus::Results {
            self.list_state.select(Some(0));
        }
        ViewAction::Submitted(outcome)
    }
}
