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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the application's color palettes and provides utilities
//! for converting colors between Ratatui's internal representation and external
//! formats (such as hexadecimal strings) used for terminal emulator styling.

use ratatui::style::Color;

use crate::store::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) foreground_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) muted_colour: Color,
    pub(crate) highlight_bg: Color,
    pub(crate) highlight_fg: Color,
    pub(crate) commander_colour: Color,
    pub(crate) commander_bg: Color,
    pub(crate) error_colour: Color,
    pub(crate) liked_colour: Color,

    pub(crate) table_code_fg: Color,
    pub(crate) table_title_fg: Color,
    pub(crate) table_school_fg: Color,
    pub(crate) table_count_fg: Color,
}

impl Default for Theme {
    // Returns the standard application theme.
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub(crate) const fn dark() -> Self {
        Self {
            background_colour: Color::Rgb(24, 26, 38),
            foreground_colour: Color::Rgb(226, 228, 240),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            muted_colour: Color::Rgb(140, 143, 160),
            highlight_bg: Color::Rgb(58, 84, 150),
            highlight_fg: Color::Rgb(255, 255, 255),
            commander_colour: Color::Rgb(226, 228, 240),
            commander_bg: Color::Rgb(36, 39, 56),
            error_colour: Color::Rgb(240, 98, 98),
            liked_colour: Color::Rgb(236, 112, 160),

            table_code_fg: Color::Rgb(255, 215, 0),
            table_title_fg: Color::Rgb(255, 255, 255),
            table_school_fg: Color::Rgb(179, 157, 219),
            table_count_fg: Color::Rgb(162, 161, 166),
        }
    }

    pub(crate) const fn light() -> Self {
        Self {
            background_colour: Color::Rgb(248, 247, 242),
            foreground_colour: Color::Rgb(36, 38, 48),
            accent_colour: Color::Rgb(176, 96, 0),
            border_colour: Color::Rgb(170, 170, 170),
            muted_colour: Color::Rgb(110, 112, 122),
            highlight_bg: Color::Rgb(196, 214, 250),
            highlight_fg: Color::Rgb(20, 20, 30),
            commander_colour: Color::Rgb(36, 38, 48),
            commander_bg: Color::Rgb(230, 228, 220),
            error_colour: Color::Rgb(190, 30, 30),
            liked_colour: Color::Rgb(200, 40, 110),

            table_code_fg: Color::Rgb(150, 90, 0),
            table_title_fg: Color::Rgb(20, 20, 30),
            table_school_fg: Color::Rgb(96, 60, 160),
            table_count_fg: Color::Rgb(110, 112, 122),
        }
    }

    pub(crate) const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences. Only `Rgb` colours have a hexadecimal form.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }

    /// Parses a `#rrggbb` course colour.
    pub(crate) fn parse_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}
