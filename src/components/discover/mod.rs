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

//! Discover page: the overview of course lists and a single list with
//! faculty/tag facets and client-side pagination.
//!
//! The pseudo-list [`ALL_COURSES_SLUG`] shows the whole catalog, which is
//! loaded separately from the curated lists.

mod event;
mod render;

use ratatui::widgets::ListState;

use crate::{
    components::CourseTable,
    model::{Course, CourseList, Remote},
    search::{filter::FilterEngine, pagination::Segmented},
};

pub(crate) const ALL_COURSES_SLUG: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Facets,
    Courses,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Facet {
    Faculty(String),
    Tag(String),
}

pub(crate) struct DiscoverView {
    lists: Remote<Vec<CourseList>>,
    all_courses: Remote<Vec<Course>>,
    selected: Option<String>,
    overview_state: ListState,
    filter: FilterEngine,
    segmented: Segmented,
    facet_cursor: usize,
    table: CourseTable,
    focus: Focus,
}

impl DiscoverView {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            lists: Remote::Idle,
            all_courses: Remote::Idle,
            selected: None,
            overview_state: ListState::default(),
            filter: FilterEngine::default(),
            segmented: Segmented::new(page_size),
            facet_cursor: 0,
            table: CourseTable::new(),
            focus: Focus::Courses,
        }
    }

    /// Shows the overview (`None`) or one list. Selecting the list already
    /// shown keeps its filters.
    pub(crate) fn select(&mut self, slug: Option<&str>) {
        if self.selected.as_deref() == slug {
            return;
        }
        self.selected = slug.map(str::to_string);
        self.focus = Focus::Courses;
        self.facet_cursor = 0;
        self.reload_source();
    }

    pub(crate) fn selected_slug(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub(crate) fn needs_lists(&self) -> bool {
        self.lists.needs_fetch()
    }

    pub(crate) fn needs_all_courses(&self) -> bool {
        self.selected.as_deref() == Some(ALL_COURSES_SLUG) && self.all_courses.needs_fetch()
    }

    pub(crate) fn lists_loading(&mut self) {
        self.lists = Remote::Loading;
    }

    pub(crate) fn all_courses_loading(&mut self) {
        self.all_courses = Remote::Loading;
    }

    pub(crate) fn set_lists(&mut self, result: Result<Vec<CourseList>, String>) {
        self.lists = result.into();
        self.reload_source();
    }

    pub(crate) fn set_all_courses(&mut self, result: Result<Vec<Course>, String>) {
        self.all_courses = result.into();
        self.reload_source();
    }

    pub(crate) fn lists(&self) -> &Remote<Vec<CourseList>> {
        &self.lists
    }

    /// Title of the selected list, `None` on the overview or for an
    /// unknown slug.
    pub(crate) fn selected_title(&self) -> Option<&str> {
        match self.selected.as_deref()? {
            ALL_COURSES_SLUG => Some("All courses"),
            slug => self
                .lists
                .ready()?
                .iter()
                .find(|list| list.slug == slug)
                .map(|list| list.name.as_str()),
        }
    }

    /// The selected slug matches nothing in the loaded lists.
    pub(crate) fn is_not_found(&self) -> bool {
        match self.selected.as_deref() {
            None | Some(ALL_COURSES_SLUG) => false,
            Some(slug) => self
                .lists
                .ready()
                .is_some_and(|lists| !lists.iter().any(|list| list.slug == slug)),
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        match self.selected.as_deref() {
            Some(ALL_COURSES_SLUG) => self.all_courses.is_loading(),
            _ => self.lists.is_loading(),
        }
    }

    pub(crate) fn is_failed(&self) -> bool {
        match self.selected.as_deref() {
            Some(ALL_COURSES_SLUG) => matches!(self.all_courses, Remote::Failed),
            _ => matches!(self.lists, Remote::Failed),
        }
    }

    pub(crate) fn filter(&self) -> &FilterEngine {
        &self.filter
    }

    pub(crate) fn segmented(&self) -> &Segmented {
        &self.segmented
    }

    /// Courses on the visible page, after filtering.
    #[cfg(test)]
    pub(crate) fn page_courses(&self) -> &[Course] {
        self.table.courses()
    }

    /// Faculties first, then tags.
    pub(crate) fn facets(&self) -> Vec<Facet> {
        self.filter
            .faculties()
            .iter()
            .map(|f| Facet::Faculty(f.clone()))
            .chain(self.filter.tags().iter().map(|t| Facet::Tag(t.clone())))
            .collect()
    }

    pub(crate) fn is_facet_selected(&self, facet: &Facet) -> bool {
        let state = self.filter.state();
        match facet {
            Facet::Faculty(faculty) => state.selected_faculties.contains(faculty),
            Facet::Tag(tag) => state.selected_tags.contains(tag),
        }
    }

    pub(crate) fn toggle_faculty(&mut self, faculty: &str) {
        self.filter.toggle_faculty(faculty);
        self.refilter();
    }

    pub(crate) fn toggle_tag(&mut self, tag: &str) {
        self.filter.toggle_tag(tag);
        self.refilter();
    }

    pub(crate) fn clear_filters(&mut self) {
        self.filter.clear();
        self.refilter();
    }

    fn source_courses(&self) -> Vec<Course> {
        match self.selected.as_deref() {
            None => vec![],
            Some(ALL_COURSES_SLUG) => self.all_courses.ready().cloned().unwrap_or_default(),
            Some(slug) => self
                .lists
                .ready()
                .and_then(|lists| lists.iter().find(|list| list.slug == slug))
                .map(|list| list.courses.clone())
                .unwrap_or_default(),
        }
    }

    fn reload_source(&mut self) {
        let courses = self.source_courses();
        self.filter.set_courses(courses);
        self.refilter();
    }

    fn refilter(&mut self) {
        self.segmented.set_len(self.filter.filtered().len());
        self.sync_page();
    }

    fn sync_page(&mut self) {
        let page = self.segmented.slice(self.filter.filtered()).to_vec();
        self.table.set_courses(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CourseBackend, local::LocalBackend};

    fn seeded_lists() -> Vec<CourseList> {
        let backend = LocalBackend::open_in_memory().unwrap();
        backend.discover().unwrap()
    }

    fn codes(view: &DiscoverView) -> Vec<&str> {
        view.filter().filtered().iter().map(|c| c.code.as_str()).collect()
    }

    #[test]
    fn selecting_a_list_loads_its_courses() {
        let mut view = DiscoverView::new(10);
        view.set_lists(Ok(seeded_lists()));
        view.select(Some("spms"));

        assert_eq!(view.selected_title(), Some("Physical & Mathematical Sciences"));
        assert!(!view.is_not_found());
        assert!(codes(&view).iter().all(|c| c.starts_with("MH") || c.starts_with("PH")));
    }

    #[test]
    fn faculty_then_tag_narrow_the_list() {
        let mut view = DiscoverView::new(10);
        view.set_lists(Ok(seeded_lists()));
        view.select(Some(ALL_COURSES_SLUG));
        let backend = LocalBackend::open_in_memory().unwrap();
        view.set_all_courses(Ok(backend.all_courses().unwrap()));

        view.toggle_faculty("SPMS");
        assert!(view
            .filter()
            .filtered()
            .iter()
            .all(|c| c.school.as_deref() == Some("SPMS")));

        view.toggle_tag("sequences");
        assert_eq!(codes(&view), vec!["MH1811", "MH1812"]);

        view.clear_filters();
        assert_eq!(view.filter().filtered().len(), view.filter().source().len());
    }

    #[test]
    fn unknown_slug_is_not_found() {
        let mut view = DiscoverView::new(10);
        view.select(Some("nope"));
        assert!(!view.is_not_found());

        view.set_lists(Ok(seeded_lists()));
        assert!(view.is_not_found());
        assert!(view.page_courses().is_empty());
    }

    #[test]
    fn pages_slice_the_filtered_courses() {
        let mut view = DiscoverView::new(4);
        view.select(Some(ALL_COURSES_SLUG));
        let backend = LocalBackend::open_in_memory().unwrap();
        view.set_all_courses(Ok(backend.all_courses().unwrap()));

        assert_eq!(view.page_courses().len(), 4);
        assert_eq!(view.segmented().page_count(), 4);

        view.toggle_faculty("CCDS");
        assert_eq!(view.segmented().page_idx(), 0);
        assert_eq!(view.segmented().page_count(), 2);
    }

    #[test]
    fn reselecting_keeps_filters() {
        let mut view = DiscoverView::new(10);
        view.set_lists(Ok(seeded_lists()));
        view.select(Some("spms"));
        view.toggle_tag("calculus");
        view.select(Some("spms"));

        assert!(!view.filter().state().is_empty());
    }
}
