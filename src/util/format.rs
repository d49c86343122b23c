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

/// Formats a count with a singular or plural noun.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(plural(1, "course"), "1 course");
/// assert_eq!(plural(3, "course"), "3 courses");
/// ```
pub(crate) fn plural(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Renders a 1 to 5 score as filled and empty blocks.
pub(crate) fn score_bar(score: f32) -> String {
    let filled = score.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "■".repeat(filled), "□".repeat(5 - filled))
}

/// Truncates `text` to at most `width` characters, marking the cut with an
/// ellipsis.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plurals() {
        assert_eq!(plural(0, "result"), "0 results");
        assert_eq!(plural(1, "result"), "1 result");
    }

    #[test]
    fn score_bars_round() {
        assert_eq!(score_bar(3.4), "■■■□□");
        assert_eq!(score_bar(4.5), "■■■■■");
        assert_eq!(score_bar(9.0), "■■■■■");
    }

    #[test]
    fn truncation_marks_the_cut() {
        assert_eq!(truncate("Mathematics 2", 20), "Mathematics 2");
        assert_eq!(truncate("Mathematics 2", 5), "Math…");
    }
}
