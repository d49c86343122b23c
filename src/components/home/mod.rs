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

//! Home page: a shuffled preview of trending courses.

mod render;

use std::collections::HashSet;

use crossterm::event::Event;
use rand::{rng, seq::SliceRandom};

use crate::{
    components::{CourseTable, CourseTableAction, ViewAction},
    model::{Course, TrendingCourses},
    route::Route,
};

pub(crate) const PREVIEW_SIZE: usize = 12;

#[derive(Default)]
pub(crate) struct HomeView {
    table: CourseTable,
}

impl HomeView {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Picks up to [`PREVIEW_SIZE`] distinct courses across all periods, in
    /// random order.
    pub(crate) fn set_trending(&mut self, trending: &TrendingCourses) {
        let mut seen = HashSet::new();
        let mut courses: Vec<Course> = trending
            .values()
            .flatten()
            .filter(|course| seen.insert(course.code.as_str()))
            .cloned()
            .collect();

        courses.shuffle(&mut rng());
        courses.truncate(PREVIEW_SIZE);
        self.table.set_courses(courses);
    }

    pub(crate) fn courses(&self) -> &[Course] {
        self.table.courses()
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<ViewAction> {
        match self.table.process_event(event)? {
            CourseTableAction::Open(code) => Some(ViewAction::Navigate(Route::course(&code))),
        }
    }
}
