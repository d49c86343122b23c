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

//! Pagination controls.
//!
//! [`Pagination`] is a transient view over server-side result metadata and
//! uses 1-based pages. [`Segmented`] paginates an in-memory list with 0-based
//! page indices. Both show a window of at most three pages: the current page
//! and its neighbours, never repeating the current page.

pub(crate) const DEFAULT_SEGMENT_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    current: u32,
    max_page: u32,
    loading: bool,
}

impl Pagination {
    pub(crate) fn new(found: u64, per_page: u32, current: u32, loading: bool) -> Self {
        let per_page = u64::from(per_page.max(1));
        let max_page = u32::try_from(found.div_ceil(per_page)).unwrap_or(u32::MAX);

        Self {
            current: current.clamp(1, max_page.max(1)),
            max_page,
            loading,
        }
    }

    pub(crate) fn current(&self) -> u32 {
        self.current
    }

    pub(crate) fn max_page(&self) -> u32 {
        self.max_page
    }

    /// Pages to show, in order, without duplicates.
    pub(crate) fn window(&self) -> Vec<u32> {
        let last = self.max_page.max(1);
        let min = self.current.saturating_sub(1).max(1);
        let max = (self.current + 1).min(last);

        let mut pages = vec![min, self.current, max];
        pages.dedup();
        pages
    }

    pub(crate) fn is_previous_disabled(&self) -> bool {
        self.current <= 1
    }

    pub(crate) fn is_next_disabled(&self) -> bool {
        self.current >= self.max_page
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.loading || self.max_page < 2
    }

    /// Validates a requested page, `None` means nothing should happen.
    pub(crate) fn page_change(&self, page: u32) -> Option<u32> {
        let valid = (1..=self.max_page).contains(&page);
        (valid && page != self.current).then_some(page)
    }

    pub(crate) fn previous(&self) -> Option<u32> {
        self.current
            .checked_sub(1)
            .and_then(|page| self.page_change(page))
    }

    pub(crate) fn next(&self) -> Option<u32> {
        self.page_change(self.current.saturating_add(1))
    }
}

/// Client-side pagination over a list of known length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segmented {
    page_size: usize,
    page_idx: usize,
    len: usize,
}

impl Segmented {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page_idx: 0,
            len: 0,
        }
    }

    /// Sets the source length and returns to the first page.
    pub(crate) fn set_len(&mut self, len: usize) {
        self.len = len;
        self.page_idx = 0;
    }

    pub(crate) fn page_idx(&self) -> usize {
        self.page_idx
    }

    pub(crate) fn page_count(&self) -> usize {
        self.len.div_ceil(self.page_size)
    }

    pub(crate) fn max_page_idx(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    pub(crate) fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page_idx * self.page_size).min(items.len());
        let end = (start + self.page_size).min(items.len());
        &items[start..end]
    }

    pub(crate) fn window(&self) -> Vec<usize> {
        let min = self.page_idx.saturating_sub(1);
        let max = (self.page_idx + 1).min(self.max_page_idx());

        let mut pages = vec![min, self.page_idx, max];
        pages.dedup();
        pages
    }

    pub(crate) fn is_previous_disabled(&self) -> bool {
        self.page_idx == 0
    }

    pub(crate) fn is_next_disabled(&self) -> bool {
        self.page_idx >= self.max_page_idx()
    }

    pub(crate) fn is_hidden(&self) -> bool {
        self.page_count() < 2
    }

    /// Moves to `page_idx`, an index out of range moves to the first page.
    pub(crate) fn page_change(&mut self, page_idx: usize) -> bool {
        let target = if page_idx <= self.max_page_idx() {
            page_idx
        } else {
            0
        };

        let changed = target != self.page_idx;
        self.page_idx = target;
        changed
    }

    pub(crate) fn previous(&mut self) -> bool {
        !self.is_previous_disabled() && self.page_change(self.page_idx - 1)
    }

    pub(crate) fn next(&mut self) -> bool {
        !self.is_next_disabled() && self.page_change(self.page_idx + 1)
    }
}

impl Default for Segmented {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_page_rounds_up() {
        assert_eq!(Pagination::new(61, 30, 1, false).max_page(), 3);
        assert_eq!(Pagination::new(60, 30, 1, false).max_page(), 2);
        assert_eq!(Pagination::new(0, 30, 1, false).max_page(), 0);
        assert_eq!(Pagination::new(5, 0, 1, false).max_page(), 5);
    }

    #[test]
    fn window_never_repeats_current() {
        assert_eq!(Pagination::new(90, 30, 1, false).window(), vec![1, 2]);
        assert_eq!(Pagination::new(90, 30, 2, false).window(), vec![1, 2, 3]);
        assert_eq!(Pagination::new(90, 30, 3, false).window(), vec![2, 3]);
        assert_eq!(Pagination::new(10, 30, 1, false).window(), vec![1]);
    }

    #[test]
    fn window_stays_within_range() {
        for current in 1..=7 {
            let pagination = Pagination::new(200, 30, current, false);
            let window = pagination.window();
            assert!(window.contains(&current));
            assert!(window.iter().all(|p| (1..=pagination.max_page()).contains(p)));
        }
    }

    #[test]
    fn out_of_range_and_current_page_are_no_ops() {
        let pagination = Pagination::new(90, 30, 2, false);

        assert_eq!(pagination.page_change(0), None);
        assert_eq!(pagination.page_change(4), None);
        assert_eq!(pagination.page_change(2), None);
        assert_eq!(pagination.page_change(3), Some(3));
    }

    #[test]
    fn edges_disable_previous_and_next() {
        let first = Pagination::new(90, 30, 1, false);
        assert!(first.is_previous_disabled());
        assert_eq!(first.previous(), None);
        assert_eq!(first.next(), Some(2));

        let last = Pagination::new(90, 30, 3, false);
        assert!(last.is_next_disabled());
        assert_eq!(last.next(), None);
        assert_eq!(last.previous(), Some(2));
    }

    #[test]
    fn hidden_while_loading_or_single_page() {
        assert!(Pagination::new(90, 30, 1, true).is_hidden());
        assert!(Pagination::new(30, 30, 1, false).is_hidden());
        assert!(!Pagination::new(31, 30, 1, false).is_hidden());
    }

    #[test]
    fn segmented_slices_pages() {
        let items: Vec<u32> = (0..25).collect();
        let mut segmented = Segmented::new(10);
        segmented.set_len(items.len());

        assert_eq!(segmented.page_count(), 3);
        assert_eq!(segmented.slice(&items), &items[0..10]);

        assert!(segmented.next());
        assert!(segmented.next());
        assert_eq!(segmented.slice(&items), &items[20..25]);
        assert!(!segmented.next());
    }

    #[test]
    fn segmented_out_of_range_goes_to_first_page() {
        let mut segmented = Segmented::new(10);
        segmented.set_len(25);
        segmented.page_change(2);

        assert!(segmented.page_change(9));
        assert_eq!(segmented.page_idx(), 0);
    }

    #[test]
    fn segmented_resets_when_source_changes() {
        let mut segmented = Segmented::new(10);
        segmented.set_len(25);
        segmented.next();
        segmented.set_len(12);

        assert_eq!(segmented.page_idx(), 0);
        assert_eq!(segmented.window(), vec![0, 1]);
    }

    #[test]
    fn segmented_hidden_for_single_page() {
        let mut segmented = Segmented::new(10);
        segmented.set_len(10);
        assert!(segmented.is_hidden());
        segmented.set_len(0);
        assert!(segmented.is_hidden());
        assert!(segmented.slice::<u32>(&[]).is_empty());
    }
}
