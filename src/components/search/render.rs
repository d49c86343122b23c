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

//! Rendering for the search panel.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, List, ListItem, Paragraph, Tabs},
};

use crate::{
    components::search::{Focus, ResultRow, SearchMode, SearchPanel},
    model::SearchCategory,
    search::{coordinator::SearchCache, history::SearchHistory, pagination::Pagination},
    theme::Theme,
    util::format::plural,
};

impl SearchPanel {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        cache: &SearchCache,
        history: &SearchHistory,
        theme: &Theme,
    ) {
        let [tabs_area, input_area, status_area, list_area, pages_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        self.draw_tabs(f, tabs_area, theme);
        self.draw_input(f, input_area, theme);
        self.draw_status(f, status_area, cache, history, theme);
        self.draw_rows(f, list_area, cache, history, theme);

        if self.mode == SearchMode::Page
            && let Some(pagination) = self.coordinator.pagination(cache)
        {
            draw_pagination(f, pages_area, &pagination, theme);
        }
    }

    fn draw_tabs(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let selected = SearchCategory::ALL
            .iter()
            .position(|c| *c == self.coordinator.draft().category)
            .unwrap_or(0);

        let tabs = Tabs::new(SearchCategory::ALL.iter().map(|c| c.as_str()))
            .select(selected)
            .style(Style::default().fg(theme.muted_colour))
            .highlight_style(Style::default().fg(theme.accent_colour).bold())
            .divider("│");

        f.render_widget(tabs, area);
    }

    fn draw_input(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.focus == Focus::Input {
            theme.accent_colour
        } else {
            theme.border_colour
        };

        let width = area.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(width);

        let input = Paragraph::new(self.input.value())
            .style(Style::default().fg(theme.foreground_colour))
            .scroll((0, scroll as u16))
            .block(
                Block::bordered()
                    .title(" Search ")
                    .border_style(Style::default().fg(border)),
            );
        f.render_widget(input, area);

        if self.focus == Focus::Input {
            let x = self.input.visual_cursor().max(scroll) - scroll;
            f.set_cursor_position((area.x + 1 + x as u16, area.y + 1));
        }
    }

    fn draw_status(
        &self,
        f: &mut Frame,
        area: Rect,
        cache: &SearchCache,
        history: &SearchHistory,
        theme: &Theme,
    ) {
        let current = self.coordinator.current();

        let (text, colour) = if self.coordinator.is_debounce_pending() {
            ("…".to_string(), theme.muted_colour)
        } else if self.coordinator.is_empty_query() {
            if history.len(self.coordinator.draft().category) == 0 {
                ("Type to search".to_string(), theme.muted_colour)
            } else {
                ("Recent searches, X to clear".to_string(), theme.muted_colour)
            }
        } else if let Some(error) = cache.error(current) {
            (format!("Search failed: {error}, r to retry"), theme.error_colour)
        } else if self.coordinator.is_loading_search(cache) && self.coordinator.data(cache).is_none() {
            ("Searching…".to_string(), theme.muted_colour)
        } else if self.coordinator.show_no_results(cache) {
            (format!("No results for \"{}\"", current.q), theme.muted_colour)
        } else {
            match self.coordinator.pagination(cache) {
                Some(pagination) if self.mode == SearchMode::Page && pagination.max_page() > 1 => (
                    format!(
                        "{}, page {} of {}",
                        plural(self.coordinator.data_count(cache), "result"),
                        pagination.current(),
                        pagination.max_page()
                    ),
                    theme.muted_colour,
                ),
                Some(_) => (
                    plural(self.coordinator.data_count(cache), "result"),
                    theme.muted_colour,
                ),
                None => (String::new(), theme.muted_colour),
            }
        };

        f.render_widget(Paragraph::new(text).style(Style::default().fg(colour)), area);
    }

    fn draw_rows(
        &mut self,
        f: &mut Frame,
        area: Rect,
        cache: &SearchCache,
        history: &SearchHistory,
        theme: &Theme,
    ) {
        let items: Vec<ListItem> = self
            .rows(cache, history)
            .into_iter()
            .map(|row| match row {
                ResultRow::History(q) => ListItem::new(Line::from(vec![
                    Span::styled("↺ ", Style::default().fg(theme.muted_colour)),
                    Span::styled(q, Style::default().fg(theme.foreground_colour)),
                ])),
                ResultRow::Entity(entity) => ListItem::new(Line::from(vec![
                    Span::styled(
                        entity.title().to_string(),
                        Style::default().fg(theme.table_title_fg),
                    ),
                    Span::raw("  "),
                    Span::styled(entity.subtitle(), Style::default().fg(theme.muted_colour)),
                ])),
                ResultRow::ViewResults(found) => ListItem::new(Line::from(Span::styled(
                    format!("View all {} →", plural(found, "result")),
                    Style::default().fg(theme.accent_colour),
                ))),
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg));

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn draw_pagination(f: &mut Frame, area: Rect, pagination: &Pagination, theme: &Theme) {
    if pagination.is_hidden() {
        return;
    }

    let enabled = Style::default().fg(theme.foreground_colour);
    let disabled = Style::default().fg(theme.border_colour);

    let mut spans = vec![Span::styled(
        "‹ ",
        if pagination.is_previous_disabled() { disabled } else { enabled },
    )];

    for page in pagination.window() {
        if page == pagination.current() {
            spans.push(Span::styled(
                format!("[{page}] "),
                Style::default().fg(theme.accent_colour).bold(),
            ));
        } else {
            spans.push(Span::styled(format!("{page} "), enabled));
        }
    }

    spans.push(Span::styled(
        "›",
        if pagination.is_next_disabled() { disabled } else { enabled },
    ));

    f.render_widget(Paragraph::new(Line::from(spans)).centered(), area);
}
