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

//! Key-based query cache.
//!
//! The cache never performs a fetch itself. A [`QueryCache::lookup`] reports
//! whether the caller should issue one, and marks the key as in flight so a
//! second lookup for the same key does not. Results are stored with
//! [`QueryCache::resolve`] under the key they were fetched for, whatever
//! order they arrive in.
//!
//! Entries older than the stale threshold are still served, and a lookup
//! requests a background revalidation for them.

use std::{
    collections::HashMap,
    hash::Hash,
    sync::Arc,
    time::{Duration, Instant},
};

pub(crate) const DEFAULT_CAPACITY: usize = 64;

/// What a lookup requires of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Fetch {
    /// Fresh data is cached, or a fetch for the key is already running.
    None,
    /// Nothing cached yet.
    Initial,
    /// Stale data is cached and served while it is refreshed.
    Revalidate,
}

impl Fetch {
    pub(crate) fn is_required(&self) -> bool {
        !matches!(self, Fetch::None)
    }
}

#[derive(Debug)]
struct Entry<V> {
    data: Option<Arc<V>>,
    fetched_at: Option<Instant>,
    in_flight: bool,
    invalidated: bool,
    error: Option<String>,
    last_used: Instant,
}

impl<V> Entry<V> {
    fn new(now: Instant) -> Self {
        Self {
            data: None,
            fetched_at: None,
            in_flight: false,
            invalidated: false,
            error: None,
            last_used: now,
        }
    }
}

#[derive(Debug)]
pub(crate) struct QueryCache<K, V> {
    entries: HashMap<K, Entry<V>>,
    stale_after: Duration,
    capacity: usize,
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
{
    pub(crate) fn new(stale_after: Duration) -> Self {
        Self::with_capacity(stale_after, DEFAULT_CAPACITY)
    }

    pub(crate) fn with_capacity(stale_after: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
            capacity: capacity.max(1),
        }
    }

    /// Looks up `key` and marks it in flight when a fetch is required.
    pub(crate) fn lookup(&mut self, key: &K, now: Instant) -> Fetch {
        let stale_after = self.stale_after;

        if !self.entries.contains_key(key) {
            self.evict();
        }

        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(now));
        entry.last_used = now;

        if entry.in_flight {
            tracing::debug!(?key, "fetch already in flight");
            return Fetch::None;
        }

        let fetch = match entry.fetched_at {
            None => Fetch::Initial,
            Some(_) if entry.invalidated => Fetch::Revalidate,
            Some(at) if now.saturating_duration_since(at) >= stale_after => Fetch::Revalidate,
            Some(_) => Fetch::None,
        };

        if fetch.is_required() {
            tracing::debug!(?key, ?fetch, "fetch required");
            entry.in_flight = true;
        }

        fetch
    }

    /// Stores the outcome of a fetch for `key`.
    ///
    /// A failure keeps whatever data was cached before.
    pub(crate) fn resolve(&mut self, key: &K, result: Result<V, String>, now: Instant) {
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::new(now));

        entry.in_flight = false;
        match result {
            Ok(value) => {
                entry.data = Some(Arc::new(value));
                entry.fetched_at = Some(now);
                entry.invalidated = false;
                entry.error = None;
            }
            Err(e) => {
                tracing::warn!(?key, error = %e, "fetch failed");
                entry.error = Some(e);
            }
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).and_then(|e| e.data.clone())
    }

    pub(crate) fn is_in_flight(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(|e| e.in_flight)
    }

    pub(crate) fn error(&self, key: &K) -> Option<&str> {
        self.entries.get(key).and_then(|e| e.error.as_deref())
    }

    /// Marks an entry stale so the next lookup refetches it.
    pub(crate) fn invalidate(&mut self, key: &K) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.invalidated = true;
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops least recently used settled entries until there is room for one
    /// more. In-flight entries are never dropped.
    fn evict(&mut self) {
        while self.entries.len() >= self.capacity {
            let victim = self
                .entries
                .iter()
                .filter(|(_, e)| !e.in_flight)
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone());

            match victim {
                Some(key) => {
                    tracing::debug!(?key, "evicting cache entry");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}
