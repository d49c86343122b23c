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

//! Review form: five 1 to 5 scores, a recommended flag and a free-text
//! description.

use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{components::course::ReviewDraft, model::ReviewScore};

const RECOMMENDED_FIELD: usize = 5;
const DESCRIPTION_FIELD: usize = 6;
const FIELD_COUNT: usize = 7;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormAction {
    Submit(ReviewDraft),
    Cancel,
}

#[derive(Debug, Default)]
pub(crate) struct ReviewForm {
    pub(super) score: ReviewScore,
    pub(super) recommended: bool,
    pub(super) description: Input,
    pub(super) field: usize,
    pub(super) submitting: bool,
}

impl ReviewForm {
    pub(crate) fn new() -> Self {
        Self {
            recommended: true,
            ..Self::default()
        }
    }

    pub(crate) fn draft(&self) -> ReviewDraft {
        ReviewDraft {
            score: self.score,
            recommended: self.recommended,
            description: self.description.value().trim().to_string(),
        }
    }

    pub(crate) fn is_description_field(&self) -> bool {
        self.field == DESCRIPTION_FIELD
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub(crate) fn process_event(&mut self, event: &Event) -> Option<FormAction> {
        let Event::Key(key) = event else {
            return None;
        };

        match key.code {
            KeyCode::Esc => return Some(FormAction::Cancel),
            KeyCode::Enter if !self.submitting && self.score.is_valid() => {
                self.submitting = true;
                return Some(FormAction::Submit(self.draft()));
            }
            KeyCode::Enter => {}
            KeyCode::Tab | KeyCode::Down => self.field = (self.field + 1) % FIELD_COUNT,
            KeyCode::BackTab | KeyCode::Up => {
                self.field = (self.field + FIELD_COUNT - 1) % FIELD_COUNT
            }
            _ => match self.field {
                RECOMMENDED_FIELD => {
                    if matches!(
                        key.code,
                        KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                    ) {
                        self.recommended = !self.recommended;
                    }
                }
                DESCRIPTION_FIELD => {
                    self.description.handle_event(event);
                }
                field => self.adjust_score(field, key.code),
            },
        }

        None
    }

    fn adjust_score(&mut self, field: usize, code: KeyCode) {
        let Some(value) = self.score.value_mut(field) else {
            return;
        };

        *value = match code {
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => value.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => value.saturating_add(1),
            KeyCode::Char(c @ '1'..='5') => c as u8 - b'0',
            _ => *value,
        }
        .clamp(ReviewScore::MIN, ReviewScore::MAX);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn scores_stay_in_range() {
        let mut form = ReviewForm::new();
        for _ in 0..5 {
            form.process_event(&key(KeyCode::Right));
        }
        assert_eq!(form.score.content_usefulness, ReviewScore::MAX);

        form.process_event(&key(KeyCode::Down));
        form.process_event(&key(KeyCode::Char('1')));
        form.process_event(&key(KeyCode::Left));
        assert_eq!(form.score.lecture_clarity, ReviewScore::MIN);
    }

    #[test]
    fn submits_once_until_reset() {
        let mut form = ReviewForm::new();
        form.field = DESCRIPTION_FIELD;
        for c in "Great labs".chars() {
            form.process_event(&key(KeyCode::Char(c)));
        }
        form.process_event(&key(KeyCode::BackTab));
        form.process_event(&key(KeyCode::Char(' ')));

        let Some(FormAction::Submit(draft)) = form.process_event(&key(KeyCode::Enter)) else {
            panic!("expected a submit");
        };
        assert_eq!(draft.description, "Great labs");
        assert!(!draft.recommended);
        assert_eq!(form.process_event(&key(KeyCode::Enter)), None);

        form.set_submitting(false);
        assert!(form.process_event(&key(KeyCode::Enter)).is_some());
    }

    #[test]
    fn escape_cancels() {
        let mut form = ReviewForm::new();
        assert_eq!(form.process_event(&key(KeyCode::Esc)), Some(FormAction::Cancel));
    }
}
