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

//! Client-side faceted filtering of course lists.
//!
//! A course passes when its school is one of the selected faculties (or no
//! faculty is selected) and it carries every selected tag. Filtering keeps
//! the input order and only ever removes courses.

use std::collections::{BTreeSet, HashSet};

use crate::model::Course;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FilterState {
    pub(crate) selected_faculties: BTreeSet<String>,
    pub(crate) selected_tags: BTreeSet<String>,
}

impl FilterState {
    pub(crate) fn is_empty(&self) -> bool {
        self.selected_faculties.is_empty() && self.selected_tags.is_empty()
    }

    fn matches(&self, course: &Course) -> bool {
        let faculty = self.selected_faculties.is_empty()
            || course
                .school
                .as_ref()
                .is_some_and(|school| self.selected_faculties.contains(school));

        faculty && self.selected_tags.iter().all(|tag| course.has_tag(tag))
    }
}

pub(crate) fn apply(courses: &[Course], state: &FilterState) -> Vec<Course> {
    courses
        .iter()
        .filter(|course| state.matches(course))
        .cloned()
        .collect()
}

/// Distinct non-empty schools, in first-seen order.
pub(crate) fn faculty_options(courses: &[Course]) -> Vec<String> {
    distinct(courses.iter().filter_map(|c| c.school.as_deref()))
}

/// Distinct non-empty tags, in first-seen order.
pub(crate) fn tag_options(courses: &[Course]) -> Vec<String> {
    distinct(courses.iter().flat_map(|c| c.tags.iter().map(String::as_str)))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Filter state bound to a source list, with the filtered result kept
/// current after every change.
#[derive(Debug, Default)]
pub(crate) struct FilterEngine {
    source: Vec<Course>,
    state: FilterState,
    filtered: Vec<Course>,
    faculties: Vec<String>,
    tags: Vec<String>,
}

impl FilterEngine {
    /// Replaces the source list. Any selection is dropped.
    pub(crate) fn set_courses(&mut self, courses: Vec<Course>) {
        self.faculties = faculty_options(&courses);
        self.tags = tag_options(&courses);
        self.filtered = courses.clone();
        self.source = courses;
        self.state = FilterState::default();
    }

    pub(crate) fn toggle_faculty(&mut self, faculty: &str) {
        toggle(&mut self.state.selected_faculties, faculty);
        self.refresh();
    }

    pub(crate) fn toggle_tag(&mut self, tag: &str) {
        toggle(&mut self.state.selected_tags, tag);
        self.refresh();
    }

    pub(crate) fn clear(&mut self) {
        self.state = FilterState::default();
        self.refresh();
    }

    pub(crate) fn state(&self) -> &FilterState {
        &self.state
    }

    pub(crate) fn source(&self) -> &[Course] {
        &self.source
    }

    pub(crate) fn filtered(&self) -> &[Course] {
        &self.filtered
    }

    pub(crate) fn faculties(&self) -> &[String] {
        &self.faculties
    }

    pub(crate) fn tags(&self) -> &[String] {
        &self.tags
    }

    fn refresh(&mut self) {
        self.filtered = apply(&self.source, &self.state);
        tracing::debug!(
            faculties = ?self.state.selected_faculties,
            tags = ?self.state.selected_tags,
            count = self.filtered.len(),
            "filter applied"
        );
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}
