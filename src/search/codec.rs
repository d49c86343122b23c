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

//! Query string encoding for search state.
//!
//! The canonical form is `q=<text>&type=<category>&page=<n>`. Decoding is
//! lenient: every parameter is optional and invalid values fall back to the
//! defaults of [`SearchQuery`].

use std::borrow::Cow;

use crate::model::{SearchCategory, search::SearchQuery};

pub(crate) fn encode(query: &SearchQuery) -> String {
    format!(
        "q={}&type={}&page={}",
        urlencoding::encode(&query.q),
        query.category,
        query.page.max(1)
    )
}

pub(crate) fn decode(query_string: &str) -> SearchQuery {
    let mut query = SearchQuery::default();

    let query_string = query_string.strip_prefix('?').unwrap_or(query_string);

    for pair in query_string.split('&').filter(|p| !p.is_empty()) {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let value = decode_component(value);

        match name {
            "q" => query.q = value.into_owned(),
            "type" | "category" => {
                query.category = value.parse().unwrap_or_else(|_| {
                    tracing::debug!(%value, "unknown search category in query string");
                    SearchCategory::default()
                })
            }
            "page" => {
                query.page = value.parse::<u32>().ok().filter(|p| *p >= 1).unwrap_or(1);
            }
            _ => {}
        }
    }

    query
}

fn decode_component(value: &str) -> Cow<'_, str> {
    if !value.contains(['+', '%']) {
        return Cow::Borrowed(value);
    }

    let spaced = value.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Owned(spaced),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_canonical_form() {
        let query = SearchQuery::new("linear algebra", 2, SearchCategory::Lists);
        assert_eq!(encode(&query), "q=linear%20algebra&type=lists&page=2");
    }

    #[test]
    fn missing_parameters_use_defaults() {
        assert_eq!(decode(""), SearchQuery::default());
        assert_eq!(decode("?"), SearchQuery::default());
    }

    #[test]
    fn decodes_all_parameters() {
        let query = decode("?q=data+structures&type=characters&page=3");
        assert_eq!(query.q, "data structures");
        assert_eq!(query.category, SearchCategory::Characters);
        assert_eq!(query.page, 3);
    }

    #[test]
    fn invalid_values_fall_back() {
        let query = decode("q=t&type=books&page=0");
        assert_eq!(query.category, SearchCategory::Courses);
        assert_eq!(query.page, 1);

        assert_eq!(decode("page=-4").page, 1);
        assert_eq!(decode("page=two").page, 1);
    }

    #[test]
    fn percent_encoding_round_trips() {
        let query = SearchQuery::new("C++ & you?", 1, SearchCategory::Courses);
        assert_eq!(decode(&encode(&query)), query);
    }
}
