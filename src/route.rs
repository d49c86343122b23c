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

//! Application routes.
//!
//! Every screen is addressable by a path such as `/course/SC3004/reviews` or
//! `/search/courses?q=t&type=courses&page=1`. Paths are parsed leniently: an
//! unknown segment resolves to the nearest valid parent, so parsing never
//! fails.

use std::fmt;

use crate::{
    MainView,
    model::{SearchCategory, TrendPeriod, search::SearchQuery},
    search::codec,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CourseTab {
    #[default]
    Information,
    Reviews,
}

impl CourseTab {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            CourseTab::Information => "information",
            CourseTab::Reviews => "reviews",
        }
    }

    pub(crate) fn toggle(&self) -> Self {
        match self {
            CourseTab::Information => CourseTab::Reviews,
            CourseTab::Reviews => CourseTab::Information,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    Discover,
    DiscoverList(String),
    Trending(TrendPeriod),
    Search {
        category: SearchCategory,
        query: Option<SearchQuery>,
    },
    Course {
        code: String,
        tab: CourseTab,
    },
    Watchlist,
}

impl Route {
    /// Search page route carrying the full query state.
    pub(crate) fn search(query: &SearchQuery) -> Self {
        Route::Search {
            category: query.category,
            query: Some(query.clone()),
        }
    }

    pub(crate) fn course(code: &str) -> Self {
        Route::Course {
            code: code.to_string(),
            tab: CourseTab::Information,
        }
    }

    pub(crate) fn main_view(&self) -> MainView {
        match self {
            Route::Home => MainView::Home,
            Route::Discover | Route::DiscoverList(_) => MainView::Discover,
            Route::Trending(_) => MainView::Trending,
            Route::Search { .. } => MainView::Search,
            Route::Course { .. } => MainView::Course,
            Route::Watchlist => MainView::Watchlist,
        }
    }

    pub(crate) fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Discover => "/discover".to_string(),
            Route::DiscoverList(slug) => format!("/discover/{}", urlencoding::encode(slug)),
            Route::Trending(period) => format!("/trending/{period}"),
            Route::Search { category, query } => match query {
                Some(query) => format!("/search/{category}?{}", codec::encode(query)),
                None => format!("/search/{category}"),
            },
            Route::Course { code, tab } => match tab {
                CourseTab::Information => format!("/course/{}", urlencoding::encode(code)),
                CourseTab::Reviews => format!("/course/{}/reviews", urlencoding::encode(code)),
            },
            Route::Watchlist => "/watchlist".to_string(),
        }
    }

    pub(crate) fn parse(path: &str) -> Self {
        let (path, query_string) = match path.split_once('?') {
            Some((path, qs)) => (path, Some(qs)),
            None => (path, None),
        };

        let segments: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| {
                urlencoding::decode(s)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| s.to_string())
            })
            .collect();

        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["discover"] => Route::Discover,
            ["discover", slug, ..] => Route::DiscoverList(slug.to_string()),
            ["trending"] => Route::Trending(TrendPeriod::default()),
            ["trending", period, ..] => Route::Trending(period.parse().unwrap_or_default()),
            ["search", rest @ ..] => {
                let category = rest
                    .first()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or_default();
                let query = query_string.map(|qs| codec::decode(qs).with_category(category));
                Route::Search { category, query }
            }
            ["course", code] => Route::course(code),
            ["course", code, tab, ..] => Route::Course {
                code: code.to_string(),
                tab: match *tab {
                    "reviews" => CourseTab::Reviews,
                    _ => CourseTab::Information,
                },
            },
            ["watchlist", ..] => Route::Watchlist,
            _ => {
                tracing::debug!(path, "unknown route");
                Route::Home
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current route plus the stack of routes to go back to.
#[derive(Debug)]
pub(crate) struct Navigator {
    current: Route,
    back_stack: Vec<Route>,
}

impl Navigator {
    pub(crate) fn new(route: Route) -> Self {
        Self {
            current: route,
            back_stack: vec![],
        }
    }

    pub(crate) fn current(&self) -> &Route {
        &self.current
    }

    pub(crate) fn navigate(&mut self, route: Route) {
        if route == self.current {
            return;
        }
        tracing::info!(from = %self.current, to = %route, "navigate");
        let previous = std::mem::replace(&mut self.current, route);
        self.back_stack.push(previous);
    }

    /// Replaces the current route without adding a back entry.
    pub(crate) fn replace(&mut self, route: Route) {
        self.current = route;
    }

    pub(crate) fn back(&mut self) -> Option<&Route> {
        let previous = self.back_stack.pop()?;
        tracing::info!(from = %self.current, to = %previous, "back");
        self.current = previous;
        Some(&self.current)
    }

    pub(crate) fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        let routes = [
            Route::Home,
            Route::Discover,
            Route::DiscoverList("spms-core".into()),
            Route::Trending(TrendPeriod::Year),
            Route::search(&SearchQuery::new("t", 2, SearchCategory::Lists)),
            Route::Search {
                category: SearchCategory::Users,
                query: None,
            },
            Route::course("MH1811"),
            Route::Course {
                code: "SC3004".into(),
                tab: CourseTab::Reviews,
            },
            Route::Watchlist,
        ];

        for route in routes {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn search_path_carries_the_query_string() {
        let route = Route::search(&SearchQuery::new("t", 1, SearchCategory::Courses));
        assert!(route.path().starts_with("/search/courses?q=t"));
    }

    #[test]
    fn path_category_overrides_query_type() {
        let route = Route::parse("/search/lists?q=core&type=users&page=2");
        let Route::Search { category, query } = route else {
            panic!("expected a search route");
        };
        assert_eq!(category, SearchCategory::Lists);
        assert_eq!(query.map(|q| q.category), Some(SearchCategory::Lists));
    }

    #[test]
    fn invalid_segments_resolve_to_parent() {
        assert_eq!(Route::parse("/trending/decade"), Route::Trending(TrendPeriod::ThreeMonths));
        assert_eq!(Route::parse("/course/SC3004/syllabus"), Route::course("SC3004"));
        assert_eq!(Route::parse("/course"), Route::Home);
        assert_eq!(Route::parse("/nowhere"), Route::Home);
        assert!(matches!(
            Route::parse("/search/books"),
            Route::Search {
                category: SearchCategory::Courses,
                query: None
            }
        ));
    }

    #[test]
    fn navigator_back_stack() {
        let mut navigator = Navigator::default();
        navigator.navigate(Route::Discover);
        navigator.navigate(Route::course("MH1811"));
        navigator.navigate(Route::course("MH1811"));

        assert_eq!(navigator.back(), Some(&Route::Discover));
        assert_eq!(navigator.back(), Some(&Route::Home));
        assert_eq!(navigator.back(), None);
        assert_eq!(navigator.current(), &Route::Home);
    }

    #[test]
    fn replace_does_not_add_back_entry() {
        let mut navigator = Navigator::default();
        navigator.navigate(Route::Discover);
        navigator.replace(Route::Watchlist);

        assert_eq!(navigator.back(), Some(&Route::Home));
        assert!(!navigator.can_go_back());
    }
}
