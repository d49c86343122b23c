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

//! Interactive course table widget.
//!
//! This module provides a reusable table component for displaying and
//! selecting courses. The table owns its rows and selection, and reports the
//! course to open through [`CourseTableAction`].

mod event;
mod render;

use ratatui::widgets::TableState;

use crate::{components::{next_index, previous_index}, model::Course};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CourseTableAction {
    Open(String),
}

#[derive(Debug, Default)]
pub(crate) struct CourseTable {
    courses: Vec<Course>,
    table_state: TableState,
    ranked: bool,
}

impl CourseTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A table that numbers its rows.
    pub(crate) fn ranked() -> Self {
        Self {
            ranked: true,
            ..Self::default()
        }
    }

    /// Replaces the rows and selects the first one.
    pub(crate) fn set_courses(&mut self, courses: Vec<Course>) {
        self.courses = courses;
        self.reset_table_selection();
    }

    pub(crate) fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub(crate) fn selected_course(&self) -> Option<&Course> {
        self.table_state.selected().and_then(|i| self.courses.get(i))
    }

    pub(crate) fn reset_table_selection(&mut self) {
        let first = (!self.courses.is_empty()).then_some(0);
        self.table_state.select(first);
    }

    fn goto_next(&mut self) {
        let next = next_index(self.table_state.selected(), self.courses.len());
        self.table_state.select(next);
    }

    fn goto_previous(&mut self) {
        let previous = previous_index(self.table_state.selected(), self.courses.len());
        self.table_state.select(previous);
    }

    fn goto_first(&mut self) {
        self.table_state.select_first();
    }

    fn goto_last(&mut self) {
        self.table_state.select_last();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn courses(codes: &[&str]) -> Vec<Course> {
        codes
            .iter()
            .map(|code| serde_json::from_value(serde_json::json!({ "code": code })).unwrap())
            .collect()
    }

    #[test]
    fn enter_opens_selected_course() {
        let mut table = CourseTable::new();
        table.set_courses(courses(&["MH1810", "MH1811"]));

        assert_eq!(table.process_event(&key(KeyCode::Char('j'))), None);
        assert_eq!(
            table.process_event(&key(KeyCode::Enter)),
            Some(CourseTableAction::Open("MH1811".into()))
        );
    }

    #[test]
    fn selection_wraps_and_resets() {
        let mut table = CourseTable::new();
        table.set_courses(courses(&["A", "B"]));
        table.process_event(&key(KeyCode::Up));
        assert_eq!(table.selected_course().map(|c| c.code.as_str()), Some("B"));

        table.set_courses(courses(&["C"]));
        assert_eq!(table.selected_course().map(|c| c.code.as_str()), Some("C"));
    }

    #[test]
    fn empty_table_opens_nothing() {
        let mut table = CourseTable::new();
        assert_eq!(table.process_event(&key(KeyCode::Enter)), None);
    }
}
