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

//! Trending courses for a selectable period, ranked by likes.

mod render;

use crossterm::event::{Event, KeyCode};

use crate::{
    components::{CourseTable, CourseTableAction, ViewAction},
    model::{Course, Remote, TrendPeriod, TrendingCourses},
    route::Route,
};

pub(crate) struct TrendingView {
    period: TrendPeriod,
    trending: Remote<TrendingCourses>,
    table: CourseTable,
}

impl TrendingView {
    pub(crate) fn new() -> Self {
        Self {
            period: TrendPeriod::default(),
            trending: Remote::Idle,
            table: CourseTable::ranked(),
        }
    }

    pub(crate) fn period(&self) -> TrendPeriod {
        self.period
    }

    pub(crate) fn set_period(&mut self, period: TrendPeriod) {
        if period != self.period {
            self.period = period;
            self.sync_table();
        }
    }

    pub(crate) fn needs_fetch(&self) -> bool {
        self.trending.needs_fetch()
    }

    pub(crate) fn loading(&mut self) {
        self.trending = Remote::Loading;
    }

    pub(crate) fn set_trending(&mut self, result: Result<TrendingCourses, String>) {
        self.trending = result.into();
        self.sync_table();
    }

    /// Courses for the given period, empty until loaded.
    pub(crate) fn courses_for(&self, period: TrendPeriod) -> &[Course] {
        self.trending
            .ready()
            .and_then(|trending| trending.get(&period))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<ViewAction> {
        let Event::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Tab => Some(ViewAction::Navigate(Route::Trending(self.period.next()))),
            KeyCode::Char('r') if matches!(self.trending, Remote::Failed) => {
                Some(ViewAction::Retry)
            }
            _ => match self.table.process_event(event)? {
                CourseTableAction::Open(code) => Some(ViewAction::Navigate(Route::course(&code))),
            },
        }
    }

    fn sync_table(&mut self) {
        let courses = self.courses_for(self.period).to_vec();
        self.table.set_courses(courses);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::api::{CourseBackend, local::LocalBackend};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn period_selects_courses() {
        let backend = LocalBackend::open_in_memory().unwrap();
        let mut view = TrendingView::new();
        assert!(view.needs_fetch());

        view.set_trending(Ok(backend.trending().unwrap()));
        assert!(!view.needs_fetch());
        assert!(!view.courses_for(TrendPeriod::Year).is_empty());

        view.set_period(TrendPeriod::Year);
        assert_eq!(
            view.table.courses(),
            view.courses_for(TrendPeriod::Year)
        );
    }

    #[test]
    fn tab_navigates_to_next_period() {
        let mut view = TrendingView::new();
        assert_eq!(
            view.process_event(&key(KeyCode::Tab)),
            Some(ViewAction::Navigate(Route::Trending(TrendPeriod::SixMonths)))
        );
    }

    #[test]
    fn retry_only_after_failure() {
        let mut view = TrendingView::new();
        assert_eq!(view.process_event(&key(KeyCode::Char('r'))), None);

        view.set_trending(Err("offline".into()));
        assert_eq!(view.process_event(&key(KeyCode::Char('r'))), Some(ViewAction::Retry));
        assert!(view.needs_fetch());
    }
}
