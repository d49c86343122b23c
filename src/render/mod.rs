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

//! User interface rendering logic.
//!
//! This module handles the translation of the [`App`] state into visual
//! widgets using the `ratatui` framework. It is responsible for layout
//! management, widget styling, and terminal frame composition.
//!
//! # Rendering Pipeline
//!
//! The primary entry point is the [`draw`] function, which is called after
//! every handled event. The active view fills the main area, the quick
//! search overlay is drawn last on top of everything else.

mod commander;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::{App, MainView, render::commander::draw_commander, theme::Theme};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

const NAV_ITEMS: [(MainView, &str); 5] = [
    (MainView::Home, "1 Home"),
    (MainView::Discover, "2 Discover"),
    (MainView::Trending, "3 Trending"),
    (MainView::Search, "4 Search"),
    (MainView::Watchlist, "5 Watchlist"),
];

/// Renders the user interface to the terminal frame.
///
/// The screen is split into a header with the navigation and the signed-in
/// user, the active view, a status line and the command line.
pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(
            Style::default()
                .bg(app.theme.background_colour)
                .fg(app.theme.foreground_colour),
        ),
        area,
    );

    // Outer layout: header, main, status, command line
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, outer[0], app);

    let theme = app.theme;
    match app.main_view {
        MainView::Home => app.home_view.draw(f, outer[1], &theme),
        MainView::Discover => app.discover_view.draw(f, outer[1], &theme),
        MainView::Trending => app.trending_view.draw(f, outer[1], &theme),
        MainView::Search => app.search_page.draw(
            f,
            outer[1],
            &app.search_cache,
            &app.store.search.history,
            &theme,
        ),
        MainView::Course => app.course_view.draw(f, outer[1], &theme),
        MainView::Watchlist => app.watchlist_view.draw(f, outer[1], &theme),
    }

    draw_status(f, outer[2], app);
    draw_commander(f, outer[3], app);

    if app.store.ui.search_overlay_visible {
        draw_search_overlay(f, area, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let mut spans = vec![
        Span::styled(
            " CourseFinder ",
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.accent_colour)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    for (view, label) in NAV_ITEMS {
        let style = if view == app.main_view {
            Style::default()
                .fg(theme.accent_colour)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.muted_colour)
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }

    spans.push(Span::styled(
        format!("  {}", app.navigator.current()),
        Style::default().fg(theme.border_colour),
    ));

    f.render_widget(Paragraph::new(Line::from(spans)), area);

    let user = match &app.store.user.user {
        Some(user) => Span::styled(
            format!("{} ", user.username),
            Style::default().fg(theme.foreground_colour),
        ),
        None => Span::styled("signed out ", Style::default().fg(theme.muted_colour)),
    };
    f.render_widget(
        Paragraph::new(Line::from(user)).alignment(Alignment::Right),
        area,
    );
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let line = if let Some(toast) = &app.store.ui.toast {
        Line::styled(
            format!(" {}", toast.message),
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.highlight_bg),
        )
    } else if let Some(status) = &app.status {
        Line::styled(format!(" {status}"), Style::default().fg(theme.error_colour))
    } else {
        let back = if app.navigator.can_go_back() { "  b back" } else { "" };
        Line::styled(
            format!(" / quick search  : command{back}  T theme  q quit"),
            Style::default().fg(theme.muted_colour),
        )
    };

    f.render_widget(Paragraph::new(line), area);
}

fn draw_search_overlay(f: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme;
    let popup = centered_rect(area, 70, area.height.saturating_sub(4).min(24));

    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Quick search ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent_colour))
        .style(Style::default().bg(theme.background_colour))
        .padding(Padding::horizontal(1));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    app.overlay.draw(
        f,
        inner,
        &app.search_cache,
        &app.store.search.history,
        &theme,
    );
}

/// A rectangle `percent_x` wide and `height` tall, centred in `area`.
pub(crate) fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, column, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x.min(100)) / 2),
        Constraint::Percentage(percent_x.min(100)),
        Constraint::Percentage((100 - percent_x.min(100)) / 2),
    ])
    .areas(row);

    column
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(area, 70, 16);

        assert_eq!(popup.width, 70);
        assert_eq!(popup.height, 16);
        assert_eq!(popup.x, 15);
        assert_eq!(popup.y, 12);
    }

    #[test]
    fn centered_rect_clamps_height() {
        let area = Rect::new(0, 0, 80, 10);
        let popup = centered_rect(area, 50, 16);

        assert_eq!(popup.height, 10);
        assert!(popup.width <= 40);
    }
}
