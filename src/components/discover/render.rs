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

//! Rendering for the discover page.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
};

use crate::{
    components::discover::{ALL_COURSES_SLUG, DiscoverView, Facet, Focus},
    render::Render,
    search::pagination::Segmented,
    theme::Theme,
    util::format::{plural, truncate},
};

impl Render for DiscoverView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if self.is_failed() {
            draw_message(f, area, "Could not load courses, press r to retry", theme.error_colour);
        } else if self.selected.is_none() {
            self.draw_overview(f, area, theme);
        } else if self.is_not_found() {
            draw_message(f, area, "No such course list", theme.muted_colour);
        } else if self.is_loading() {
            draw_message(f, area, "Loading…", theme.muted_colour);
        } else {
            self.draw_list(f, area, theme);
        }
    }
}

impl DiscoverView {
    fn draw_overview(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let lists = self.lists.ready().map(Vec::as_slice).unwrap_or_default();

        let mut items = vec![ListItem::new(Line::from(vec![
            Span::styled("All courses", Style::default().fg(theme.table_title_fg).bold()),
            Span::styled("  the whole catalog", Style::default().fg(theme.muted_colour)),
        ]))];

        items.extend(lists.iter().map(|list| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(list.name.as_str(), Style::default().fg(theme.table_title_fg).bold()),
                    Span::styled(
                        format!("  {}", plural(list.courses.len() as u64, "course")),
                        Style::default().fg(theme.table_count_fg),
                    ),
                ]),
                Line::from(Span::styled(
                    truncate(&list.description, area.width.saturating_sub(4) as usize),
                    Style::default().fg(theme.muted_colour),
                )),
            ])
        }));

        if self.overview_state.selected().is_none() {
            self.overview_state.select(Some(0));
        }

        let list = List::new(items)
            .block(Block::bordered().title(" Discover ").border_style(Style::default().fg(theme.border_colour)))
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg));

        f.render_stateful_widget(list, area, &mut self.overview_state);
    }

    fn draw_list(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let [facets_area, courses_area] =
            Layout::horizontal([Constraint::Length(28), Constraint::Min(0)]).areas(area);

        self.draw_facets(f, facets_area, theme);

        let [title_area, table_area, pages_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(courses_area);

        let title = self.selected_title().unwrap_or(ALL_COURSES_SLUG).to_string();
        let count = plural(self.filter.filtered().len() as u64, "course");
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(title, Style::default().fg(theme.accent_colour).bold()),
                Span::styled(format!("  {count}"), Style::default().fg(theme.muted_colour)),
            ])),
            title_area,
        );

        if self.filter.filtered().is_empty() {
            draw_message(f, table_area, "No courses match the selected filters", theme.muted_colour);
        } else {
            self.table.draw(f, table_area, theme);
        }

        draw_segments(f, pages_area, &self.segmented, theme);
    }

    fn draw_facets(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let focused = self.focus == Focus::Facets;

        let items: Vec<ListItem> = self
            .facets()
            .into_iter()
            .map(|facet| {
                let mark = if self.is_facet_selected(&facet) { "■ " } else { "□ " };
                let (label, colour) = match &facet {
                    Facet::Faculty(name) => (name.as_str(), theme.table_school_fg),
                    Facet::Tag(name) => (name.as_str(), theme.foreground_colour),
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, Style::default().fg(theme.accent_colour)),
                    Span::styled(label.to_string(), Style::default().fg(colour)),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if focused {
            state.select(Some(self.facet_cursor));
        }

        let border = if focused { theme.accent_colour } else { theme.border_colour };
        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(" Filters ")
                    .title_bottom(" c clear ")
                    .border_style(Style::default().fg(border)),
            )
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg));

        f.render_stateful_widget(list, area, &mut state);
    }
}

fn draw_segments(f: &mut Frame, area: Rect, segmented: &Segmented, theme: &Theme) {
    if segmented.is_hidden() {
        return;
    }

    let enabled = Style::default().fg(theme.foreground_colour);
    let disabled = Style::default().fg(theme.border_colour);

    let mut spans = vec![Span::styled(
        "‹ ",
        if segmented.is_previous_disabled() { disabled } else { enabled },
    )];

    for idx in segmented.window() {
        let label = idx + 1;
        if idx == segmented.page_idx() {
            spans.push(Span::styled(
                format!("[{label}] "),
                Style::default().fg(theme.accent_colour).bold(),
            ));
        } else {
            spans.push(Span::styled(format!("{label} "), enabled));
        }
    }

    spans.push(Span::styled(
        "›",
        if segmented.is_next_disabled() { disabled } else { enabled },
    ));

    f.render_widget(Paragraph::new(Line::from(spans)).centered(), area);
}

fn draw_message(f: &mut Frame, area: Rect, text: &str, colour: ratatui::style::Color) {
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(colour)).centered(),
        area,
    );
}
