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

//! Search, filtering and pagination.
//!
//! Everything in this module is plain state with no knowledge of the terminal
//! or of the worker threads. Views own these types and translate their
//! results into tasks and routes.
//!
//! # Organization
//!
//! * [`coordinator`]: The current query, its derived flags and the cache
//!   lookups it triggers.
//! * [`cache`]: Key-based result cache with in-flight de-duplication.
//! * [`codec`]: The `?q=&type=&page=` query string.
//! * [`debounce`]: Generation-token debounce timer for typed input.
//! * [`history`]: Per-category search history.
//! * [`pagination`]: Page windows for server and client side pagination.
//! * [`filter`]: Faculty and tag faceting over course lists.

pub(crate) mod cache;
pub(crate) mod codec;
pub(crate) mod coordinator;
pub(crate) mod debounce;
pub(crate) mod filter;
pub(crate) mod history;
pub(crate) mod pagination;
