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

//! Search state coordination.
//!
//! A [`SearchCoordinator`] owns exactly one current query. Changing it goes
//! through [`SearchCoordinator::submit`] (an explicit submit, which records
//! history and, when the coordinator is navigable, yields a route) or through
//! a debounced preview of what is being typed.
//!
//! The coordinator does not fetch anything. Operations that change the
//! current query consult the shared [`SearchCache`] and return the key to
//! fetch, if any; the caller turns that into a worker task and later hands
//! the result back through [`SearchCoordinator::apply_results`].
//!
//! # Page rules
//!
//! * A submit in the same category keeps the requested page, a category
//!   change always starts at page 1.
//! * A page change is honoured only while the typed text has settled onto
//!   the current query, otherwise it starts again at page 1.
//! * A query string whose text differs from the current text starts at
//!   page 1, whatever page it names.
//! * A page past the last one is pulled back onto the last page once the
//!   results say where that is.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    model::{
        SearchCategory,
        search::{SearchKey, SearchQuery, SearchResultPage},
    },
    route::Route,
    search::{
        cache::QueryCache,
        debounce::Debouncer,
        history::HistoryEntry,
        pagination::Pagination,
    },
};

pub(crate) type SearchCache = QueryCache<SearchKey, SearchResultPage>;

/// Effects of a submit for the caller to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubmitOutcome {
    pub(crate) fetch: Option<SearchKey>,
    pub(crate) route: Option<Route>,
    pub(crate) history: HistoryEntry,
}

/// Effects of applying a query string read from the current route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LocationSync {
    pub(crate) fetch: Option<SearchKey>,
    /// Set when the location had to be corrected, to be replaced in place.
    pub(crate) replace_route: Option<Route>,
}

#[derive(Debug)]
pub(crate) struct SearchCoordinator {
    current: SearchQuery,
    previous: SearchQuery,
    draft: SearchQuery,
    navigable: bool,
    debouncer: Debouncer,
}

impl SearchCoordinator {
    pub(crate) fn new(navigable: bool, debounce: Duration) -> Self {
        Self {
            current: SearchQuery::default(),
            previous: SearchQuery::default(),
            draft: SearchQuery::default(),
            navigable,
            debouncer: Debouncer::new(debounce),
        }
    }

    pub(crate) fn current(&self) -> &SearchQuery {
        &self.current
    }

    pub(crate) fn draft(&self) -> &SearchQuery {
        &self.draft
    }

    pub(crate) fn submit(
        &mut self,
        values: SearchQuery,
        cache: &mut SearchCache,
        now: Instant,
    ) -> SubmitOutcome {
        self.debouncer.cancel();
        self.make_current(values);

        tracing::info!(
            q = %self.current.q,
            category = %self.current.category,
            page = self.current.page,
            same_query = self.is_same_query(),
            "search submitted"
        );

        SubmitOutcome {
            fetch: self.lookup(cache, now),
            route: self.navigable.then(|| Route::search(&self.current)),
            history: HistoryEntry {
                category: self.current.category,
                q: self.current.q.clone(),
            },
        }
    }

    /// Debounced form of [`submit`](Self::submit): same page rules, no
    /// history entry and no navigation.
    pub(crate) fn preview(
        &mut self,
        values: SearchQuery,
        cache: &mut SearchCache,
        now: Instant,
    ) -> Option<SearchKey> {
        self.make_current(values);
        tracing::debug!(q = %self.current.q, "search preview");
        self.lookup(cache, now)
    }

    /// Records typed text and (re)arms the debounce timer.
    pub(crate) fn set_draft(&mut self, text: &str, now: Instant) {
        if self.draft.q != text {
            self.draft.q = text.to_string();
            self.draft.page = 1;
        }
        self.debouncer.arm(now);
    }

    /// Fires the pending preview once the typed text has been idle long
    /// enough.
    pub(crate) fn poll_debounce(
        &mut self,
        cache: &mut SearchCache,
        now: Instant,
    ) -> Option<SearchKey> {
        self.debouncer.poll(now)?;
        self.preview(self.draft.clone(), cache, now)
    }

    /// Switches category and submits the typed text straight away.
    pub(crate) fn select_category(
        &mut self,
        category: SearchCategory,
        cache: &mut SearchCache,
        now: Instant,
    ) -> SubmitOutcome {
        self.draft.category = category;
        self.submit(self.draft.clone(), cache, now)
    }

    /// Moves to another page of the current results.
    ///
    /// Returns `None` when the page is out of range or already current.
    pub(crate) fn set_page(
        &mut self,
        page: u32,
        cache: &mut SearchCache,
        now: Instant,
    ) -> Option<SubmitOutcome> {
        let page = self.pagination(cache)?.page_change(page)?;
        let unsettled = self.draft.q != self.current.q || self.debouncer.is_pending();
        let page = if unsettled { 1 } else { page };

        self.draft.page = page;
        Some(self.submit(self.draft.clone(), cache, now))
    }

    pub(crate) fn next_page(&mut self, cache: &mut SearchCache, now: Instant) -> Option<SubmitOutcome> {
        let page = self.pagination(cache)?.next()?;
        self.set_page(page, cache, now)
    }

    pub(crate) fn previous_page(
        &mut self,
        cache: &mut SearchCache,
        now: Instant,
    ) -> Option<SubmitOutcome> {
        let page = self.pagination(cache)?.previous()?;
        self.set_page(page, cache, now)
    }

    /// Applies query string state read from the current route.
    pub(crate) fn sync_from_location(
        &mut self,
        query: SearchQuery,
        cache: &mut SearchCache,
        now: Instant,
    ) -> LocationSync {
        let mut query = query;
        let mut replace_route = None;

        if query.q != self.current.q && query.page != 1 {
            query.page = 1;
            replace_route = self.navigable.then(|| Route::search(&query));
        }

        self.debouncer.cancel();
        self.previous = std::mem::replace(&mut self.current, query);
        self.draft = self.current.clone();

        LocationSync {
            fetch: self.lookup(cache, now),
            replace_route,
        }
    }

    /// Restores the default query. In navigable mode the returned route has
    /// no query string.
    pub(crate) fn reset(&mut self) -> Option<Route> {
        self.debouncer.cancel();
        self.previous = std::mem::take(&mut self.current);
        self.draft = SearchQuery::default();

        self.navigable.then(|| Route::Search {
            category: SearchCategory::default(),
            query: None,
        })
    }

    /// Revalidates the current key, for when a view becomes visible again.
    pub(crate) fn refresh(&mut self, cache: &mut SearchCache, now: Instant) -> Option<SearchKey> {
        self.lookup(cache, now)
    }

    /// Refetches the current query even if cached data is fresh.
    pub(crate) fn revalidate(&mut self, cache: &mut SearchCache, now: Instant) -> Option<SearchKey> {
        cache.invalidate(&self.current);
        self.lookup(cache, now)
    }

    /// Pulls a current page past the end of the results back onto the last
    /// page. Returns `None` when the current page is in range or no results
    /// have arrived yet.
    pub(crate) fn clamp_page(&mut self, cache: &mut SearchCache, now: Instant) -> Option<LocationSync> {
        let last = self.pagination(cache)?.max_page().max(1);
        if self.current.page <= last {
            return None;
        }

        tracing::debug!(page = self.current.page, last, "search page out of range");
        self.current.page = last;
        self.draft.page = last;

        Some(LocationSync {
            fetch: self.lookup(cache, now),
            replace_route: self.navigable.then(|| Route::search(&self.current)),
        })
    }

    /// Stores a fetch result. Returns true when it belongs to the current
    /// query.
    pub(crate) fn apply_results(
        &self,
        key: &SearchKey,
        result: Result<SearchResultPage, String>,
        cache: &mut SearchCache,
        now: Instant,
    ) -> bool {
        cache.resolve(key, result, now);
        *key == self.current
    }

    pub(crate) fn is_empty_query(&self) -> bool {
        self.current.q.is_empty()
    }

    pub(crate) fn is_same_query(&self) -> bool {
        self.current.q == self.previous.q
    }

    pub(crate) fn is_same_category(&self) -> bool {
        self.current.category == self.previous.category
    }

    /// The typed text has settled onto the current query, in an unchanged
    /// category.
    pub(crate) fn is_similar_query(&self) -> bool {
        self.is_same_category()
            && !self.debouncer.is_pending()
            && self.draft.q == self.current.q
            && self.draft.category == self.current.category
    }

    pub(crate) fn is_debounce_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub(crate) fn is_loading_search(&self, cache: &SearchCache) -> bool {
        !self.is_empty_query() && cache.is_in_flight(&self.current)
    }

    pub(crate) fn data(&self, cache: &SearchCache) -> Option<Arc<SearchResultPage>> {
        if self.is_empty_query() {
            return None;
        }
        cache.get(&self.current)
    }

    pub(crate) fn data_count(&self, cache: &SearchCache) -> u64 {
        self.data(cache).map_or(0, |page| page.found)
    }

    pub(crate) fn show_no_results(&self, cache: &SearchCache) -> bool {
        !self.is_empty_query()
            && self.is_similar_query()
            && self.data_count(cache) == 0
            && !self.is_loading_search(cache)
    }

    pub(crate) fn pagination(&self, cache: &SearchCache) -> Option<Pagination> {
        let data = self.data(cache)?;
        Some(Pagination::new(
            data.found,
            data.request_params.per_page,
            self.current.page,
            self.is_loading_search(cache),
        ))
    }

    fn make_current(&mut self, values: SearchQuery) {
        let page = if values.category == self.current.category {
            values.page
        } else {
            1
        };

        let next = values.with_page(page);
        self.previous = std::mem::replace(&mut self.current, next);
        self.draft = self.current.clone();
    }

    fn lookup(&self, cache: &mut SearchCache, now: Instant) -> Option<SearchKey> {
        if self.is_empty_query() {
            return None;
        }

        cache
            .lookup(&self.current, now)
            .is_required()
            .then(|| self.current.clone())
    }
}
