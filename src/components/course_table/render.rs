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

//! UI rendering logic for the course table.
//!
//! This module handles the visual representation of course data, including
//! column layout, selection highlighting, and theme application using the
//! Ratatui widget system.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Cell, Row, Table},
};

use crate::{components::CourseTable, render::Render, theme::Theme};

impl Render for CourseTable {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        self.draw_table(f, area, theme);
    }
}

impl CourseTable {
    fn draw_table(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let ranked = self.ranked;

        let rows = self.courses.iter().enumerate().map(|(idx, course)| {
            let swatch = course
                .color
                .as_deref()
                .and_then(Theme::parse_hex)
                .unwrap_or(theme.border_colour);

            let rank = if ranked {
                format!("{:>2}", idx + 1)
            } else {
                String::new()
            };

            Row::new(vec![
                Cell::from(Line::from(rank).style(Style::default().fg(theme.table_count_fg))),
                Cell::from(Line::from("▌").style(Style::default().fg(swatch))),
                Cell::from(Line::from(course.code.as_str()).style(Style::default().fg(theme.table_code_fg))),
                Cell::from(Line::from(course.title.as_str()).style(Style::default().fg(theme.table_title_fg))),
                Cell::from(Line::from(course.school_name()).style(Style::default().fg(theme.table_school_fg))),
                Cell::from(
                    Line::from(course.likes.to_string())
                        .style(Style::default().fg(theme.table_count_fg))
                        .alignment(Alignment::Right),
                ),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(if ranked { 3 } else { 0 }),
                Constraint::Length(1),
                Constraint::Length(8),
                Constraint::Percentage(60),
                Constraint::Percentage(30),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec![
                Cell::from(""),
                Cell::from(""),
                Cell::from("Code"),
                Cell::from("Title"),
                Cell::from("School"),
                Cell::from(Line::from("Likes").alignment(Alignment::Right)),
            ])
            .style(Style::default().bold().fg(theme.accent_colour))
            .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
        .block(Block::default());

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}
