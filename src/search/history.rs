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

//! Per-category search history.
//!
//! Entries are kept in insertion order with the most recent last. Every
//! submit appends, duplicates included; once a category holds `limit`
//! entries the oldest is evicted.

use std::collections::{HashMap, VecDeque};

use crate::model::SearchCategory;

pub(crate) const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HistoryEntry {
    pub(crate) category: SearchCategory,
    pub(crate) q: String,
}

#[derive(Debug, Clone)]
pub(crate) struct SearchHistory {
    limit: usize,
    entries: HashMap<SearchCategory, VecDeque<String>>,
}

impl SearchHistory {
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            entries: HashMap::new(),
        }
    }

    pub(crate) fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        let list = self.entries.entry(entry.category).or_default();
        list.push_back(entry.q);
        while list.len() > self.limit {
            list.pop_front();
        }
    }

    /// History for a category, oldest first.
    pub(crate) fn entries(&self, category: SearchCategory) -> impl Iterator<Item = &str> {
        self.entries
            .get(&category)
            .into_iter()
            .flat_map(|list| list.iter().map(String::as_str))
    }

    /// History for a category, most recent first, for display.
    pub(crate) fn recent(&self, category: SearchCategory) -> Vec<&str> {
        let mut recent: Vec<&str> = self.entries(category).collect();
        recent.reverse();
        recent
    }

    pub(crate) fn len(&self, category: SearchCategory) -> usize {
        self.entries.get(&category).map_or(0, VecDeque::len)
    }

    pub(crate) fn clear(&mut self, category: SearchCategory) {
        self.entries.remove(&category);
    }

    /// Replaces the whole history, typically with what was persisted.
    pub(crate) fn load(&mut self, entries: Vec<HistoryEntry>) {
        self.entries.clear();
        for entry in entries {
            self.push(entry);
        }
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: SearchCategory, q: &str) -> HistoryEntry {
        HistoryEntry {
            category,
            q: q.to_string(),
        }
    }

    #[test]
    fn appends_most_recent_last() {
        let mut history = SearchHistory::default();
        history.push(entry(SearchCategory::Courses, "a"));
        history.push(entry(SearchCategory::Courses, "b"));
        history.push(entry(SearchCategory::Courses, "a"));

        let entries: Vec<&str> = history.entries(SearchCategory::Courses).collect();
        assert_eq!(entries, vec!["a", "b", "a"]);
        assert_eq!(history.recent(SearchCategory::Courses), vec!["a", "b", "a"]);
    }

    #[test]
    fn categories_are_independent() {
        let mut history = SearchHistory::default();
        history.push(entry(SearchCategory::Courses, "t"));
        history.push(entry(SearchCategory::Lists, "core"));

        assert_eq!(history.len(SearchCategory::Courses), 1);
        assert_eq!(history.len(SearchCategory::Lists), 1);
        assert_eq!(history.len(SearchCategory::Users), 0);
    }

    #[test]
    fn evicts_oldest_beyond_limit() {
        let mut history = SearchHistory::new(3);
        for q in ["1", "2", "3", "4", "5"] {
            history.push(entry(SearchCategory::Courses, q));
        }

        let entries: Vec<&str> = history.entries(SearchCategory::Courses).collect();
        assert_eq!(entries, vec!["3", "4", "5"]);
    }

    #[test]
    fn load_applies_the_cap() {
        let mut history = SearchHistory::new(2);
        history.load(vec![
            entry(SearchCategory::Courses, "x"),
            entry(SearchCategory::Courses, "y"),
            entry(SearchCategory::Courses, "z"),
        ]);

        assert_eq!(history.recent(SearchCategory::Courses), vec!["z", "y"]);
    }
}
