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

//! Event handling for the course page.

use crossterm::event::{Event, KeyCode};

use crate::{
    components::{
        ViewAction,
        course::{CourseView, review_form::FormAction},
    },
    model::Remote,
    route::Route,
};

impl CourseView {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<ViewAction> {
        let Event::Key(key) = event else {
            return None;
        };

        if let Some(form) = &mut self.form {
            return match form.process_event(event)? {
                FormAction::Submit(draft) => Some(ViewAction::SubmitReview(draft)),
                FormAction::Cancel => {
                    self.form = None;
                    None
                }
            };
        }

        if self.failed && key.code == KeyCode::Char('r') {
            return Some(ViewAction::Retry);
        }

        if self.course().is_none() {
            return None;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => Some(ViewAction::ReplaceRoute(Route::Course {
                code: self.code.clone(),
                tab: self.tab.toggle(),
            })),
            KeyCode::Char('l') => Some(ViewAction::ToggleLike(self.code.clone())),
            KeyCode::Char('w') => Some(ViewAction::ToggleWatchlist(self.code.clone())),
            KeyCode::Char('n') => Some(ViewAction::ComposeReview),
            KeyCode::Char('r') if matches!(self.reviews, Remote::Failed) => {
                Some(ViewAction::Retry)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::{components::ReviewDraft, model::ReviewScore, route::CourseTab};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn loaded() -> CourseView {
        let mut view = CourseView::new();
        view.load("SC3004", CourseTab::Information);
        view.set_course(
            "SC3004",
            Ok(Some(
                serde_json::from_value(serde_json::json!({ "code": "SC3004" })).unwrap(),
            )),
        );
        view
    }

    #[test]
    fn keys_ignored_while_loading() {
        let mut view = CourseView::new();
        view.load("SC3004", CourseTab::Information);
        assert_eq!(view.process_event(&key(KeyCode::Char('l'))), None);
    }

    #[test]
    fn tab_replaces_the_route() {
        let mut view = loaded();
        assert_eq!(
            view.process_event(&key(KeyCode::Tab)),
            Some(ViewAction::ReplaceRoute(Route::Course {
                code: "SC3004".into(),
                tab: CourseTab::Reviews
            }))
        );
    }

    #[test]
    fn like_and_watchlist_keys() {
        let mut view = loaded();
        assert_eq!(
            view.process_event(&key(KeyCode::Char('l'))),
            Some(ViewAction::ToggleLike("SC3004".into()))
        );
        assert_eq!(
            view.process_event(&key(KeyCode::Char('w'))),
            Some(ViewAction::ToggleWatchlist("SC3004".into()))
        );
    }

    #[test]
    fn open_form_takes_the_keys() {
        let mut view = loaded();
        assert_eq!(view.process_event(&key(KeyCode::Char('n'))), Some(ViewAction::ComposeReview));

        view.open_form();
        assert_eq!(view.process_event(&key(KeyCode::Char('l'))), None);
        assert_eq!(
            view.process_event(&key(KeyCode::Enter)),
            Some(ViewAction::SubmitReview(ReviewDraft {
                score: {
                    let mut score = ReviewScore::default();
                    score.content_usefulness = 4;
                    score
                },
                recommended: true,
                description: String::new(),
            }))
        );
    }
}
