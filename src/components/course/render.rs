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

//! Rendering for the course page.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Tabs, Wrap},
};

use crate::{
    components::course::{CourseView, review_form::ReviewForm},
    model::{Course, Remote, Review, ReviewScore, average_scores},
    render::{Render, centered_rect},
    route::CourseTab,
    theme::Theme,
    util::format::{plural, score_bar},
};

impl Render for CourseView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        if self.not_found {
            f.render_widget(
                Paragraph::new(format!("No course with code {}", self.code))
                    .style(Style::default().fg(theme.muted_colour))
                    .centered(),
                area,
            );
            return;
        }

        let [header_area, tabs_area, body_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

        self.draw_header(f, header_area, theme);

        let selected = match self.tab {
            CourseTab::Information => 0,
            CourseTab::Reviews => 1,
        };
        f.render_widget(
            Tabs::new(["Information", "Reviews"])
                .select(selected)
                .style(Style::default().fg(theme.muted_colour))
                .highlight_style(Style::default().fg(theme.accent_colour).bold()),
            tabs_area,
        );

        match (self.course(), self.tab) {
            (None, _) if self.failed => f.render_widget(
                Paragraph::new("Could not load this course, press r to retry")
                    .style(Style::default().fg(theme.error_colour)),
                body_area,
            ),
            (None, _) => f.render_widget(
                Paragraph::new("Loading…").style(Style::default().fg(theme.muted_colour)),
                body_area,
            ),
            (Some(course), CourseTab::Information) => draw_information(f, body_area, course, theme),
            (Some(_), CourseTab::Reviews) => draw_reviews(f, body_area, &self.reviews, theme),
        }

        if let Some(form) = &self.form {
            draw_form(f, centered_rect(area, 70, 16), form, theme);
        }
    }
}

impl CourseView {
    fn draw_header(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let title = self.title().unwrap_or("…").to_string();
        let school = self
            .course()
            .map(|course| course.school_name().to_string())
            .unwrap_or_default();

        let heart = if self.liked { "♥" } else { "♡" };
        let watch = if self.watchlisted { "★" } else { "☆" };

        let counts = match (self.likes(), self.watchlists()) {
            (Some(likes), Some(watchlists)) => vec![
                Span::styled(format!("{heart} {likes}"), Style::default().fg(theme.liked_colour)),
                Span::raw("   "),
                Span::styled(
                    format!("{watch} {watchlists}"),
                    Style::default().fg(theme.accent_colour),
                ),
                Span::styled(
                    "   l like  w watchlist  n review  tab switch",
                    Style::default().fg(theme.muted_colour),
                ),
            ],
            _ => vec![],
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(self.code.as_str(), Style::default().fg(theme.table_code_fg).bold()),
                Span::raw("  "),
                Span::styled(title, Style::default().fg(theme.table_title_fg).bold()),
            ]),
            Line::from(Span::styled(school, Style::default().fg(theme.table_school_fg))),
            Line::from(counts),
        ];

        f.render_widget(Paragraph::new(lines), area);
    }
}

fn draw_information(f: &mut Frame, area: Rect, course: &Course, theme: &Theme) {
    let label = Style::default().fg(theme.accent_colour);
    let value = Style::default().fg(theme.foreground_colour);

    let mut lines = vec![Line::from(Span::styled(course.description.as_str(), value)), Line::default()];

    if !course.tags.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Tags  ", label),
            Span::styled(course.tags.join(", "), value),
        ]));
    }

    let prerequisites = if course.prerequisites.is_empty() {
        "none".to_string()
    } else {
        course.prerequisites.join(", ")
    };
    lines.push(Line::from(vec![
        Span::styled("Prerequisites  ", label),
        Span::styled(prerequisites, value),
    ]));

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn draw_reviews(f: &mut Frame, area: Rect, reviews: &Remote<Vec<Review>>, theme: &Theme) {
    let reviews = match reviews {
        Remote::Ready(reviews) => reviews,
        Remote::Failed => {
            f.render_widget(
                Paragraph::new("Could not load reviews, press r to retry")
                    .style(Style::default().fg(theme.error_colour)),
                area,
            );
            return;
        }
        Remote::Idle | Remote::Loading => {
            f.render_widget(
                Paragraph::new("Loading reviews…").style(Style::default().fg(theme.muted_colour)),
                area,
            );
            return;
        }
    };

    let Some(averages) = average_scores(reviews) else {
        f.render_widget(
            Paragraph::new("No reviews yet, press n to write the first one")
                .style(Style::default().fg(theme.muted_colour)),
            area,
        );
        return;
    };

    let recommended = reviews.iter().filter(|r| r.recommended).count();

    let mut lines: Vec<Line> = ReviewScore::LABELS
        .iter()
        .zip(averages)
        .map(|(label, average)| {
            Line::from(vec![
                Span::styled(format!("{label:<24}"), Style::default().fg(theme.foreground_colour)),
                Span::styled(score_bar(average), Style::default().fg(theme.accent_colour)),
                Span::styled(format!(" {average:.1}"), Style::default().fg(theme.muted_colour)),
            ])
        })
        .collect();

    lines.push(Line::from(Span::styled(
        format!(
            "{}, {recommended} recommend this course",
            plural(reviews.len() as u64, "review")
        ),
        Style::default().fg(theme.muted_colour),
    )));
    lines.push(Line::default());

    for review in reviews {
        let verdict = if review.recommended { "recommends" } else { "does not recommend" };
        lines.push(Line::from(vec![
            Span::styled(review.author.as_str(), Style::default().fg(theme.table_school_fg).bold()),
            Span::styled(format!(" {verdict}"), Style::default().fg(theme.muted_colour)),
        ]));
        if !review.description.is_empty() {
            lines.push(Line::from(Span::styled(
                review.description.as_str(),
                Style::default().fg(theme.foreground_colour),
            )));
        }
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn draw_form(f: &mut Frame, area: Rect, form: &ReviewForm, theme: &Theme) {
    let focused = |field: usize| {
        if form.field == field {
            Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg)
        } else {
            Style::default().fg(theme.foreground_colour)
        }
    };

    let values = form.score.values();
    let mut lines: Vec<Line> = ReviewScore::LABELS
        .iter()
        .enumerate()
        .map(|(idx, label)| {
            Line::from(vec![
                Span::styled(format!("{label:<24}"), focused(idx)),
                Span::styled(
                    format!(" ‹ {} › ", values[idx]),
                    Style::default().fg(theme.accent_colour),
                ),
                Span::styled(score_bar(f32::from(values[idx])), Style::default().fg(theme.accent_colour)),
            ])
        })
        .collect();

    lines.push(Line::from(vec![
        Span::styled(format!("{:<24}", "Recommended"), focused(5)),
        Span::styled(
            if form.recommended { " yes" } else { " no" },
            Style::default().fg(theme.accent_colour),
        ),
    ]));
    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Description", focused(6))));
    lines.push(Line::from(Span::styled(
        form.description.value(),
        Style::default().fg(theme.foreground_colour),
    )));
    lines.push(Line::default());

    let footer = if form.submitting {
        "Submitting…"
    } else {
        "tab next field  ‹ › change  enter submit  esc cancel"
    };
    lines.push(Line::from(Span::styled(footer, Style::default().fg(theme.muted_colour))));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::bordered()
                .title(" Write a review ")
                .border_style(Style::default().fg(theme.accent_colour))
                .style(Style::default().bg(theme.background_colour)),
        ),
        area,
    );

    if form.is_description_field() {
        let x = area.x + 1 + form.description.visual_cursor() as u16;
        let y = area.y + 1 + ReviewScore::LABELS.len() as u16 + 3;
        f.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
    }
}
