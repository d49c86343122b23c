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

//! Search service request building.
//!
//! The search service exposes a multi-search endpoint taking one search per
//! collection. Only some categories are indexed there; the others are
//! answered by the backend API.

use serde::{Deserialize, Serialize};

use crate::model::{
    SearchCategory,
    search::{SEARCH_PER_PAGE, SearchQuery, SearchResultPage},
};

const NUM_TYPOS: u32 = 3;

/// How one category is searched in the search service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CollectionParams {
    pub(crate) collection: &'static str,
    pub(crate) query_by: &'static str,
    pub(crate) query_by_weights: &'static str,
    pub(crate) sort_by: &'static str,
}

pub(crate) fn collection_params(category: SearchCategory) -> Option<CollectionParams> {
    match category {
        SearchCategory::Courses => Some(CollectionParams {
            collection: "Course_production",
            query_by: "slug,title,isbns,series_names,author_names,alternative_titles",
            query_by_weights: "5,5,5,3,1,1",
            sort_by: "users_count:desc, _text_match:desc",
        }),
        SearchCategory::Characters => Some(CollectionParams {
            collection: "Character_production",
            query_by: "name,courses,author_names",
            query_by_weights: "4,2,2",
            sort_by: "courses_count:desc, _text_match:desc",
        }),
        SearchCategory::Lists => Some(CollectionParams {
            collection: "List_production",
            query_by: "name,description,courses",
            query_by_weights: "3,2,1",
            sort_by: "followers_count:desc, _text_match:desc",
        }),
        SearchCategory::Authors | SearchCategory::Series | SearchCategory::Users => None,
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MultiSearchRequest<'a> {
    pub(crate) searches: Vec<CollectionSearch<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CollectionSearch<'a> {
    pub(crate) collection: &'static str,
    pub(crate) q: &'a str,
    pub(crate) query_by: &'static str,
    pub(crate) query_by_weights: &'static str,
    pub(crate) sort_by: &'static str,
    pub(crate) per_page: u32,
    pub(crate) page: u32,
    pub(crate) num_typos: u32,
    pub(crate) prioritize_exact_match: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MultiSearchResponse {
    pub(crate) results: Vec<SearchResultPage>,
}

impl MultiSearchResponse {
    /// The single result page of a one-search request.
    pub(crate) fn into_page(self, page: u32) -> SearchResultPage {
        self.results
            .into_iter()
            .next()
            .unwrap_or_else(|| SearchResultPage::empty(page))
    }
}

/// Builds the request for `query`, `None` when its category is not indexed.
pub(crate) fn build_request(query: &SearchQuery) -> Option<MultiSearchRequest<'_>> {
    let params = collection_params(query.category)?;

    Some(MultiSearchRequest {
        searches: vec![CollectionSearch {
            collection: params.collection,
            q: &query.q,
            query_by: params.query_by,
            query_by_weights: params.query_by_weights,
            sort_by: params.sort_by,
            per_page: SEARCH_PER_PAGE,
            page: query.page.max(1),
            num_typos: NUM_TYPOS,
            prioritize_exact_match: false,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_course_search() {
        let query = SearchQuery::new("calculus", 2, SearchCategory::Courses);
        let request = build_request(&query).unwrap();
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({
                "searches": [{
                    "collection": "Course_production",
                    "q": "calculus",
                    "query_by": "slug,title,isbns,series_names,author_names,alternative_titles",
                    "query_by_weights": "5,5,5,3,1,1",
                    "sort_by": "users_count:desc, _text_match:desc",
                    "per_page": 30,
                    "page": 2,
                    "num_typos": 3,
                    "prioritize_exact_match": false,
                }]
            })
        );
    }

    #[test]
    fn unindexed_categories_have_no_request() {
        let query = SearchQuery::new("x", 1, SearchCategory::Users);
        assert!(build_request(&query).is_none());
    }

    #[test]
    fn empty_response_becomes_empty_page() {
        let response: MultiSearchResponse = serde_json::from_value(json!({ "results": [] })).unwrap();
        assert_eq!(response.into_page(3), SearchResultPage::empty(3));
    }
}
