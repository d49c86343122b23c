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

use std::time::{Duration, Instant};

pub(crate) const TOAST_DURATION: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ThemeMode {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Toast {
    pub(crate) message: String,
    pub(crate) expires_at: Instant,
}

#[derive(Debug, Clone)]
pub(crate) enum UiAction {
    ShowSearchOverlay,
    HideSearchOverlay,
    ToggleTheme,
    ShowToast(String, Instant),
    ExpireToast(Instant),
}

#[derive(Debug, Default)]
pub(crate) struct UiState {
    pub(crate) search_overlay_visible: bool,
    pub(crate) theme: ThemeMode,
    pub(crate) toast: Option<Toast>,
}

impl UiState {
    pub(super) fn reduce(&mut self, action: UiAction) {
        match action {
            UiAction::ShowSearchOverlay => self.search_overlay_visible = true,
            UiAction::HideSearchOverlay => self.search_overlay_visible = false,
            UiAction::ToggleTheme => {
                self.theme = match self.theme {
                    ThemeMode::Dark => ThemeMode::Light,
                    ThemeMode::Light => ThemeMode::Dark,
                }
            }
            UiAction::ShowToast(message, now) => {
                self.toast = Some(Toast {
                    message,
                    expires_at: now + TOAST_DURATION,
                })
            }
            UiAction::ExpireToast(now) => {
                if self.toast.as_ref().is_some_and(|t| t.expires_at <= now) {
                    self.toast = None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_expires() {
        let mut state = UiState::default();
        let now = Instant::now();

        state.reduce(UiAction::ShowToast("hello".into(), now));
        state.reduce(UiAction::ExpireToast(now + Duration::from_secs(1)));
        assert!(state.toast.is_some());

        state.reduce(UiAction::ExpireToast(now + TOAST_DURATION));
        assert!(state.toast.is_none());
    }
}
