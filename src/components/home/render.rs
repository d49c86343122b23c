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

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{components::HomeView, render::Render, theme::Theme};

const KEYS: &[(&str, &str)] = &[
    ("/", "search"),
    ("2", "discover"),
    ("3", "trending"),
    ("5", "watchlist"),
    (":", "command"),
];

impl Render for HomeView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let [intro_area, table_area] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).areas(area);

        let mut hints = vec![];
        for (key, label) in KEYS {
            hints.push(Span::styled(*key, Style::default().fg(theme.accent_colour).bold()));
            hints.push(Span::styled(format!(" {label}   "), Style::default().fg(theme.muted_colour)));
        }

        let intro = vec![
            Line::from(Span::styled(
                "Find your next course",
                Style::default().fg(theme.foreground_colour).bold(),
            )),
            Line::from(hints),
            Line::default(),
            Line::from(Span::styled("Trending now", Style::default().fg(theme.accent_colour))),
        ];
        f.render_widget(Paragraph::new(intro), intro_area);

        if self.courses().is_empty() {
            f.render_widget(
                Paragraph::new("Loading…").style(Style::default().fg(theme.muted_colour)),
                table_area,
            );
        } else {
            self.table.draw(f, table_area, theme);
        }
    }
}
