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

//! Search panel used both as the quick-search overlay and as the search page.
//!
//! The panel binds a text input and a result list to a
//! [`SearchCoordinator`]. In overlay mode the coordinator is not navigable and
//! the list ends with a row that opens the full results page. In page mode
//! submits and page changes produce routes, and the results are paginated.

mod event;
mod render;

use std::time::Duration;

use ratatui::widgets::ListState;
use tui_input::Input;

use crate::{
    model::entity::{SearchEntity, parse_hits},
    search::{
        coordinator::{SearchCache, SearchCoordinator},
        history::SearchHistory,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchMode {
    Overlay,
    Page,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    Results,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ResultRow {
    History(String),
    Entity(SearchEntity),
    ViewResults(u64),
}

pub(crate) struct SearchPanel {
    mode: SearchMode,
    pub(crate) coordinator: SearchCoordinator,
    input: Input,
    focus: Focus,
    list_state: ListState,
}

impl SearchPanel {
    pub(crate) fn new(mode: SearchMode, debounce: Duration) -> Self {
        Self {
            mode,
            coordinator: SearchCoordinator::new(mode == SearchMode::Page, debounce),
            input: Input::default(),
            focus: Focus::Input,
            list_state: ListState::default(),
        }
    }

    pub(crate) fn mode(&self) -> SearchMode {
        self.mode
    }

    #[cfg(test)]
    pub(crate) fn input_value(&self) -> &str {
        self.input.value()
    }

    /// True while typed characters go to the text input.
    pub(crate) fn is_text_input(&self) -> bool {
        self.focus == Focus::Input
    }

    pub(crate) fn focus_input(&mut self) {
        self.focus = Focus::Input;
        self.list_state.select(None);
    }

    /// Shows the current query text in the input, after the query was set
    /// from outside the panel.
    pub(crate) fn sync_input(&mut self) {
        self.input = Input::new(self.coordinator.current().q.clone());
    }

    /// Rows for the current state: recent searches for an empty query,
    /// otherwise the parsed hits of the current page.
    pub(crate) fn rows(&self, cache: &SearchCache, history: &SearchHistory) -> Vec<ResultRow> {
        let category = self.coordinator.draft().category;

        if self.coordinator.is_empty_query() {
            return history
                .recent(category)
                .into_iter()
                .filter(|q| !q.is_empty())
                .map(|q| ResultRow::History(q.to_string()))
                .collect();
        }

        let Some(data) = self.coordinator.data(cache) else {
            return vec![];
        };

        let mut rows: Vec<ResultRow> = parse_hits(self.coordinator.current().category, &data.hits)
            .into_iter()
            .map(ResultRow::Entity)
            .collect();

        if self.mode == SearchMode::Overlay && data.found > 0 {
            rows.push(ResultRow::ViewResults(data.found));
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;

    use super::*;
    use crate::{
        components::ViewAction,
        model::{
            SearchCategory,
            search::{Hit, RequestParams, SearchQuery, SearchResultPage},
        },
        route::Route,
    };

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn page(found: u64, page: u32, codes: &[&str]) -> SearchResultPage {
        SearchResultPage {
            found,
            page,
            hits: codes
                .iter()
                .map(|code| Hit {
                    document: json!({ "code": code, "title": code }),
                })
                .collect(),
            request_params: RequestParams { per_page: 2 },
        }
    }

    fn cache() -> SearchCache {
        SearchCache::new(Duration::from_secs(60))
    }

    fn type_text(panel: &mut SearchPanel, text: &str, cache: &mut SearchCache, now: Instant) {
        let history = SearchHistory::default();
        for c in text.chars() {
            assert_eq!(panel.process_event(&key(KeyCode::Char(c)), cache, &history, now), None);
        }
    }

    fn submitted(action: Option<ViewAction>) -> crate::search::coordinator::SubmitOutcome {
        match action {
            Some(ViewAction::Submitted(outcome)) => outcome,
            other => panic!("expected a submit, got {other:?}"),
        }
    }

    #[test]
    fn typing_arms_the_debounce() {
        let mut panel = SearchPanel::new(SearchMode::Overlay, Duration::from_millis(300));
        let mut cache = cache();
        let now = Instant::now();

        type_text(&mut panel, "t", &mut cache, now);

        assert_eq!(panel.input_value(), "t");
        assert!(panel.coordinator.is_debounce_pending());
        assert_eq!(
            panel
                .coordinator
                .poll_debounce(&mut cache, now + Duration::from_millis(300)),
            Some(SearchQuery::new("t", 1, SearchCategory::Courses))
        );
    }

    #[test]
    fn overlay_submit_then_view_results() {
        let mut panel = SearchPanel::new(SearchMode::Overlay, Duration::from_millis(300));
        let mut cache = cache();
        let history = SearchHistory::default();
        let now = Instant::now();

        type_text(&mut panel, "t", &mut cache, now);
        let first = submitted(panel.process_event(&key(KeyCode::Enter), &mut cache, &history, now));
        let second = submitted(panel.process_event(&key(KeyCode::Enter), &mut cache, &history, now));

        let fetched = first.fetch.expect("first submit fetches");
        assert_eq!(second.fetch, None);
        assert_eq!(first.route, None);

        panel
            .coordinator
            .apply_results(&fetched, Ok(page(2, 1, &["SC3004", "MH1811"])), &mut cache, now);

        let rows = panel.rows(&cache, &history);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], ResultRow::ViewResults(2));

        panel.process_event(&key(KeyCode::Down), &mut cache, &history, now);
        panel.process_event(&key(KeyCode::Down), &mut cache, &history, now);
        panel.process_event(&key(KeyCode::Down), &mut cache, &history, now);

        let Some(ViewAction::Navigate(route)) =
            panel.process_event(&key(KeyCode::Enter), &mut cache, &history, now)
        else {
            panic!("expected navigation");
        };
        assert!(route.path().starts_with("/search/courses?q=t"));
    }

    #[test]
    fn opening_a_course_hit() {
        let mut panel = SearchPanel::new(SearchMode::Overlay, Duration::from_millis(300));
        let mut cache = cache();
        let history = SearchHistory::default();
        let now = Instant::now();

        type_text(&mut panel, "math", &mut cache, now);
        let outcome = submitted(panel.process_event(&key(KeyCode::Enter), &mut cache, &history, now));
        let key_ = outcome.fetch.unwrap();
        panel
            .coordinator
            .apply_results(&key_, Ok(page(1, 1, &["MH1811"])), &mut cache, now);

        panel.process_event(&key(KeyCode::Down), &mut cache, &history, now);
        assert_eq!(
            panel.process_event(&key(KeyCode::Enter), &mut cache, &history, now),
            Some(ViewAction::Navigate(Route::course("MH1811")))
        );
    }

    #[test]
    fn empty_query_lists_recent_searches() {
        let panel = SearchPanel::new(SearchMode::Page, Duration::from_millis(300));
        let mut history = SearchHistory::default();
        history.push(crate::search::history::HistoryEntry {
            category: SearchCategory::Courses,
            q: "older".into(),
        });
        history.push(crate::search::history::HistoryEntry {
            category: SearchCategory::Courses,
            q: String::new(),
        });
        history.push(crate::search::history::HistoryEntry {
            category: SearchCategory::Courses,
            q: "newer".into(),
        });

        assert_eq!(
            panel.rows(&cache(), &history),
            vec![
                ResultRow::History("newer".into()),
                ResultRow::History("older".into())
            ]
        );
    }

    #[test]
    fn tab_switches_category_and_resets_page() {
        let mut panel = SearchPanel::new(SearchMode::Page, Duration::from_millis(300));
        let mut cache = cache();
        let history = SearchHistory::default();
        let now = Instant::now();

        type_text(&mut panel, "core", &mut cache, now);
        let outcome = submitted(panel.process_event(&key(KeyCode::Tab), &mut cache, &history, now));

        assert_eq!(panel.coordinator.current().category, SearchCategory::Authors);
        assert_eq!(panel.coordinator.current().page, 1);
        assert!(outcome.route.is_some());
        assert!(!panel.coordinator.is_similar_query());
    }

    #[test]
    fn page_mode_moves_between_pages() {
        let mut panel = SearchPanel::new(SearchMode::Page, Duration::from_millis(300));
        let mut cache = cache();
        let history = SearchHistory::default();
        let now = Instant::now();

        type_text(&mut panel, "m", &mut cache, now);
        let outcome = submitted(panel.process_event(&key(KeyCode::Enter), &mut cache, &history, now));
        panel.coordinator.apply_results(
            &outcome.fetch.unwrap(),
            Ok(page(5, 1, &["MH1810", "MH1811"])),
            &mut cache,
            now,
        );

        panel.process_event(&key(KeyCode::Down), &mut cache, &history, now);
        let outcome = submitted(panel.process_event(&key(KeyCode::Right), &mut cache, &history, now));

        assert_eq!(panel.coordinator.current().page, 2);
        assert_eq!(outcome.fetch.map(|k| k.page), Some(2));
        assert!(outcome.route.unwrap().path().ends_with("page=2"));
    }

    #[test]
    fn escape_on_page_clears_the_query() {
        let mut panel = SearchPanel::new(SearchMode::Page, Duration::from_millis(300));
        let mut cache = cache();
        let history = SearchHistory::default();
        let now = Instant::now();

        type_text(&mut panel, "x", &mut cache, now);
        panel.process_event(&key(KeyCode::Enter), &mut cache, &history, now);

        assert_eq!(
            panel.process_event(&key(KeyCode::Esc), &mut cache, &history, now),
            Some(ViewAction::ReplaceRoute(Route::Search {
                category: SearchCategory::Courses,
                query: None
            }))
        );
        assert!(panel.coordinator.is_empty_query());
        assert_eq!(panel.input_value(), "");
    }
}
