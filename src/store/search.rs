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

use crate::{
    model::SearchCategory,
    search::history::{HistoryEntry, SearchHistory},
};

#[derive(Debug, Clone)]
pub(crate) enum SearchAction {
    AddHistory(HistoryEntry),
    ClearHistory(SearchCategory),
    LoadHistory(Vec<HistoryEntry>),
}

#[derive(Debug, Default)]
pub(crate) struct SearchState {
    pub(crate) history: SearchHistory,
}

impl SearchState {
    pub(crate) fn new(history_limit: usize) -> Self {
        Self {
            history: SearchHistory::new(history_limit),
        }
    }

    pub(super) fn reduce(&mut self, action: SearchAction) {
        match action {
            SearchAction::AddHistory(entry) => self.history.push(entry),
            SearchAction::ClearHistory(category) => self.history.clear(category),
            SearchAction::LoadHistory(entries) => self.history.load(entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_only_touches_one_category() {
        let mut state = SearchState::new(10);
        state.reduce(SearchAction::LoadHistory(vec![
            HistoryEntry {
                category: SearchCategory::Courses,
                q: "a".into(),
            },
            HistoryEntry {
                category: SearchCategory::Lists,
                q: "b".into(),
            },
        ]));

        state.reduce(SearchAction::ClearHistory(SearchCategory::Courses));

        assert_eq!(state.history.len(SearchCategory::Courses), 0);
        assert_eq!(state.history.len(SearchCategory::Lists), 1);
    }
}
