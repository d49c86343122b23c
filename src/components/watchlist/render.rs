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
    layout::Rect,
    style::Style,
    widgets::{Block, Paragraph},
};

use crate::{components::WatchlistView, model::Remote, render::Render, theme::Theme};

impl Render for WatchlistView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::bordered()
            .title(" Watchlist ")
            .border_style(Style::default().fg(theme.border_colour));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let message = if !self.signed_in {
            Some(("Sign in to keep a watchlist (:signin <name>)", theme.muted_colour))
        } else {
            match &self.watchlist {
                Remote::Idle | Remote::Loading => Some(("Loading…", theme.muted_colour)),
                Remote::Failed => Some(("Could not load your watchlist, press r to retry", theme.error_colour)),
                Remote::Ready(courses) if courses.is_empty() => {
                    Some(("Nothing on your watchlist yet, press w on a course to add it", theme.muted_colour))
                }
                Remote::Ready(_) => None,
            }
        };

        match message {
            Some((text, colour)) => f.render_widget(
                Paragraph::new(text).style(Style::default().fg(colour)).centered(),
                inner,
            ),
            None => self.table.draw(f, inner, theme),
        }
    }
}
