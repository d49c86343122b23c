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

//! Interactive views.
//!
//! Each view owns its transient UI state (selection, focus, input text),
//! maps key events to a [`ViewAction`] for the application to carry out, and
//! renders itself through [`crate::render::Render`] or a `draw` method taking
//! the state it needs.

pub(crate) mod course;
pub(crate) mod course_table;
pub(crate) mod discover;
pub(crate) mod home;
pub(crate) mod search;
pub(crate) mod trending;
pub(crate) mod watchlist;

pub(crate) use course::{CourseContext, CourseView, ReviewDraft};
pub(crate) use course_table::{CourseTable, CourseTableAction};
pub(crate) use discover::DiscoverView;
pub(crate) use home::HomeView;
pub(crate) use search::{SearchMode, SearchPanel};
pub(crate) use trending::TrendingView;
pub(crate) use watchlist::WatchlistView;

use crate::{
    model::{SearchCategory, search::SearchKey},
    route::Route,
    search::coordinator::SubmitOutcome,
};

/// Something a view asks the application to do.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ViewAction {
    Navigate(Route),
    ReplaceRoute(Route),
    CloseOverlay,

    Fetch(SearchKey),
    Submitted(SubmitOutcome),
    ClearHistory(SearchCategory),

    ToggleLike(String),
    ToggleWatchlist(String),
    ComposeReview,
    SubmitReview(ReviewDraft),

    Retry,
}

/// Moves a list cursor one step down, wrapping at the end.
pub(crate) fn next_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(i) if i + 1 < len => i + 1,
        Some(_) => 0,
        None => 0,
    })
}

/// Moves a list cursor one step up, wrapping at the start.
pub(crate) fn previous_index(selected: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match selected {
        Some(0) | None => len - 1,
        Some(i) => i - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps() {
        assert_eq!(next_index(Some(2), 3), Some(0));
        assert_eq!(next_index(None, 3), Some(0));
        assert_eq!(previous_index(Some(0), 3), Some(2));
        assert_eq!(previous_index(Some(1), 3), Some(0));
        assert_eq!(next_index(Some(0), 0), None);
    }
}
