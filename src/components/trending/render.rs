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
    widgets::{Paragraph, Tabs},
};

use crate::{
    components::TrendingView, model::{Remote, TrendPeriod}, render::Render, theme::Theme,
};

impl Render for TrendingView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let [tabs_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        let selected = TrendPeriod::ALL
            .iter()
            .position(|p| *p == self.period)
            .unwrap_or(0);

        let tabs = Tabs::new(TrendPeriod::ALL.iter().map(TrendPeriod::title))
            .select(selected)
            .style(Style::default().fg(theme.muted_colour))
            .highlight_style(Style::default().fg(theme.accent_colour).bold());
        f.render_widget(tabs, tabs_area);

        let message = match &self.trending {
            Remote::Idle | Remote::Loading => Some(("Loading…", theme.muted_colour)),
            Remote::Failed => Some(("Could not load trending courses, press r to retry", theme.error_colour)),
            Remote::Ready(_) if self.table.courses().is_empty() => {
                Some(("Nothing trending yet", theme.muted_colour))
            }
            Remote::Ready(_) => None,
        };

        match message {
            Some((text, colour)) => f.render_widget(
                Paragraph::new(text).style(Style::default().fg(colour)).centered(),
                body_area,
            ),
            None => self.table.draw(f, body_area, theme),
        }
    }
}
