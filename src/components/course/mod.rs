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

//! Course detail page with information and reviews tabs.
//!
//! The view is built from an explicit [`CourseContext`]: a skeleton while the
//! course loads, the course once it arrived. Like and watchlist counts are
//! adjusted in place so that toggles show immediately.

mod event;
mod render;
mod review_form;

use crate::{
    components::course::review_form::ReviewForm,
    model::{Course, Remote, Review, ReviewScore},
    route::CourseTab,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CourseContext {
    Ready(Course),
    Skeleton,
}

/// Review form values, before the author and course are attached.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReviewDraft {
    pub(crate) score: ReviewScore,
    pub(crate) recommended: bool,
    pub(crate) description: String,
}

impl ReviewDraft {
    pub(crate) fn into_review(self, course_code: &str, author: &str) -> Review {
        Review {
            course_code: course_code.to_string(),
            author: author.to_string(),
            description: self.description,
            recommended: self.recommended,
            score: self.score,
        }
    }
}

pub(crate) struct CourseView {
    code: String,
    context: CourseContext,
    not_found: bool,
    failed: bool,
    tab: CourseTab,
    reviews: Remote<Vec<Review>>,
    form: Option<ReviewForm>,
    liked: bool,
    watchlisted: bool,
}

impl CourseView {
    pub(crate) fn new() -> Self {
        Self {
            code: String::new(),
            context: CourseContext::Skeleton,
            not_found: false,
            failed: false,
            tab: CourseTab::default(),
            reviews: Remote::Idle,
            form: None,
            liked: false,
            watchlisted: false,
        }
    }

    /// Points the view at a course. Returns true when the course has to be
    /// fetched.
    pub(crate) fn load(&mut self, code: &str, tab: CourseTab) -> bool {
        self.tab = tab;

        if !self.code.eq_ignore_ascii_case(code) {
            self.code = code.to_string();
            self.context = CourseContext::Skeleton;
            self.not_found = false;
            self.failed = false;
            self.reviews = Remote::Idle;
            self.form = None;
            self.liked = false;
            self.watchlisted = false;
            return true;
        }

        self.failed
    }

    pub(crate) fn code(&self) -> &str {
        &self.code
    }

    pub(crate) fn tab(&self) -> CourseTab {
        self.tab
    }

    pub(crate) fn context(&self) -> &CourseContext {
        &self.context
    }

    pub(crate) fn course(&self) -> Option<&Course> {
        match &self.context {
            CourseContext::Ready(course) => Some(course),
            CourseContext::Skeleton => None,
        }
    }

    pub(crate) fn title(&self) -> Option<&str> {
        self.course().map(|course| course.title.as_str())
    }

    pub(crate) fn likes(&self) -> Option<u32> {
        self.course().map(|course| course.likes)
    }

    pub(crate) fn watchlists(&self) -> Option<u32> {
        self.course().map(|course| course.watchlists)
    }

    pub(crate) fn is_not_found(&self) -> bool {
        self.not_found
    }

    /// Applies a detail response. Responses for another course are
    /// ignored.
    pub(crate) fn set_course(&mut self, code: &str, result: Result<Option<Course>, String>) {
        if !self.code.eq_ignore_ascii_case(code) {
            return;
        }

        match result {
            Ok(Some(course)) => {
                self.failed = false;
                self.context = CourseContext::Ready(course);
            }
            Ok(None) => self.not_found = true,
            Err(_) => self.failed = true,
        }
    }

    pub(crate) fn needs_reviews(&self) -> bool {
        self.tab == CourseTab::Reviews && !self.not_found && self.reviews.needs_fetch()
    }

    pub(crate) fn reviews_loading(&mut self) {
        self.reviews = Remote::Loading;
    }

    pub(crate) fn set_reviews(&mut self, code: &str, result: Result<Vec<Review>, String>) {
        if self.code.eq_ignore_ascii_case(code) {
            self.reviews = result.into();
        }
    }

    pub(crate) fn set_marks(&mut self, liked: bool, watchlisted: bool) {
        self.liked = liked;
        self.watchlisted = watchlisted;
    }

    pub(crate) fn adjust_likes(&mut self, delta: i32) {
        if let CourseContext::Ready(course) = &mut self.context {
            course.likes = course.likes.saturating_add_signed(delta);
        }
    }

    pub(crate) fn adjust_watchlists(&mut self, delta: i32) {
        if let CourseContext::Ready(course) = &mut self.context {
            course.watchlists = course.watchlists.saturating_add_signed(delta);
        }
    }

    pub(crate) fn open_form(&mut self) {
        self.tab = CourseTab::Reviews;
        if self.form.is_none() {
            self.form = Some(ReviewForm::new());
        }
    }

    pub(crate) fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    /// True while the review form takes every key.
    pub(crate) fn is_text_input(&self) -> bool {
        self.is_form_open()
    }

    pub(crate) fn review_submitted(&mut self, code: &str) {
        if self.code.eq_ignore_ascii_case(code) {
            self.form = None;
            self.reviews = Remote::Loading;
        }
    }

    /// Re-enables the form after a failed submit, keeping what was typed.
    pub(crate) fn review_failed(&mut self, code: &str) {
        if self.code.eq_ignore_ascii_case(code)
            && let Some(form) = &mut self.form
        {
            form.set_submitting(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, likes: u32) -> Course {
        serde_json::from_value(serde_json::json!({
            "code": code,
            "title": "Mathematics 2",
            "likes": likes,
        }))
        .unwrap()
    }

    #[test]
    fn skeleton_until_loaded() {
        let mut view = CourseView::new();
        assert!(view.load("MH1811", CourseTab::Information));
        assert_eq!(view.context(), &CourseContext::Skeleton);
        assert_eq!(view.title(), None);

        view.set_course("MH1811", Ok(Some(course("MH1811", 0))));
        assert_eq!(view.title(), Some("Mathematics 2"));
        assert!(!view.load("MH1811", CourseTab::Reviews));
        assert_eq!(view.tab(), CourseTab::Reviews);
    }

    #[test]
    fn stale_responses_are_ignored() {
        let mut view = CourseView::new();
        view.load("MH1811", CourseTab::Information);
        view.load("SC3004", CourseTab::Information);

        view.set_course("MH1811", Ok(Some(course("MH1811", 0))));
        assert_eq!(view.context(), &CourseContext::Skeleton);
    }

    #[test]
    fn missing_course_is_not_found() {
        let mut view = CourseView::new();
        view.load("XX9999", CourseTab::Information);
        view.set_course("XX9999", Ok(None));

        assert!(view.is_not_found());
        assert!(!view.needs_reviews());
    }

    #[test]
    fn failed_load_is_retried() {
        let mut view = CourseView::new();
        view.load("MH1811", CourseTab::Information);
        view.set_course("MH1811", Err("offline".into()));

        assert!(view.load("MH1811", CourseTab::Information));
    }

    #[test]
    fn counts_never_go_negative() {
        let mut view = CourseView::new();
        view.load("MH1811", CourseTab::Information);
        view.set_course("MH1811", Ok(Some(course("MH1811", 0))));

        view.adjust_likes(1);
        assert_eq!(view.likes(), Some(1));
        view.adjust_likes(-1);
        view.adjust_likes(-1);
        assert_eq!(view.likes(), Some(0));
    }

    #[test]
    fn submitted_review_closes_the_form() {
        let mut view = CourseView::new();
        view.load("SC3004", CourseTab::Information);
        view.open_form();
        assert_eq!(view.tab(), CourseTab::Reviews);
        assert!(view.is_text_input());

        view.review_failed("SC3004");
        assert!(view.is_form_open());

        view.review_submitted("SC3004");
        assert!(!view.is_form_open());
        assert!(view.reviews.is_loading());
    }
}
