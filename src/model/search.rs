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

//! Search queries and result pages.
//!
//! A [`SearchQuery`] is the complete description of one search: the text, the
//! requested page and the category. It is also the cache key for the result
//! page, see [`SearchKey`].

use serde::{Deserialize, Serialize};

use crate::model::SearchCategory;

/// Results per page requested from the search service.
pub(crate) const SEARCH_PER_PAGE: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub(crate) struct SearchQuery {
    pub(crate) q: String,
    pub(crate) page: u32,
    pub(crate) category: SearchCategory,
}

impl SearchQuery {
    pub(crate) fn new(q: impl Into<String>, page: u32, category: SearchCategory) -> Self {
        Self {
            q: q.into(),
            page: page.max(1),
            category,
        }
    }

    pub(crate) fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub(crate) fn with_category(&self, category: SearchCategory) -> Self {
        Self {
            category,
            ..self.clone()
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            q: String::new(),
            page: 1,
            category: SearchCategory::default(),
        }
    }
}

/// Cache identity of a result page. Two queries that differ only in page are
/// different keys.
pub(crate) type SearchKey = SearchQuery;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Hit {
    pub(crate) document: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RequestParams {
    pub(crate) per_page: u32,
}

/// One page of search results, as returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SearchResultPage {
    pub(crate) found: u64,
    pub(crate) page: u32,
    #[serde(default)]
    pub(crate) hits: Vec<Hit>,
    pub(crate) request_params: RequestParams,
}

impl SearchResultPage {
    pub(crate) fn empty(page: u32) -> Self {
        Self {
            found: 0,
            page,
            hits: vec![],
            request_params: RequestParams {
                per_page: SEARCH_PER_PAGE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_query_is_empty_first_page_of_courses() {
        let query = SearchQuery::default();
        assert_eq!(query.q, "");
        assert_eq!(query.page, 1);
        assert_eq!(query.category, SearchCategory::Courses);
    }

    #[test]
    fn page_zero_becomes_first_page() {
        assert_eq!(SearchQuery::new("t", 0, SearchCategory::Lists).page, 1);
        assert_eq!(SearchQuery::default().with_page(0).page, 1);
    }

    #[test]
    fn keys_differing_only_in_page_are_distinct() {
        let a = SearchQuery::new("calculus", 1, SearchCategory::Courses);
        let b = a.with_page(2);
        assert_ne!(a, b);
    }

    #[test]
    fn result_page_deserializes_service_payload() {
        let page: SearchResultPage = serde_json::from_value(json!({
            "found": 42,
            "page": 2,
            "hits": [{ "document": { "code": "SC3004" } }],
            "request_params": { "per_page": 30 },
            "search_time_ms": 3,
        }))
        .unwrap();

        assert_eq!(page.found, 42);
        assert_eq!(page.hits.len(), 1);
        assert_eq!(page.request_params.per_page, 30);
    }
}
