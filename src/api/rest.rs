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

//! HTTP backend.
//!
//! Talks JSON to the CourseFinder API under `<base>/api`, and to the search
//! service's multi-search endpoint for the categories it indexes. Response
//! bodies are accepted either bare or wrapped in a single named field.

use anyhow::Context;
use reqwest::{
    Method,
    blocking::{Client, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    api::{ApiError, ApiResult, CourseBackend, typesense},
    config::AppConfig,
    model::{
        Course, CourseList, Review, TrendingCourses,
        search::{Hit, RequestParams, SEARCH_PER_PAGE, SearchQuery, SearchResultPage},
    },
};

pub(crate) struct RestBackend {
    client: Client,
    api_url: String,
    search_host: Option<String>,
    search_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Bare(T),
    Wrapped(Wrapper<T>),
}

#[derive(Debug, Deserialize)]
struct Wrapper<T> {
    #[serde(
        alias = "results",
        alias = "courses",
        alias = "course",
        alias = "lists",
        alias = "reviews",
        alias = "watchlist",
        alias = "liked",
        alias = "exists"
    )]
    data: T,
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Bare(value) => value,
            Envelope::Wrapped(wrapper) => wrapper.data,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BackendSearch {
    Page(SearchResultPage),
    Multi(typesense::MultiSearchResponse),
    Courses(Envelope<Vec<Course>>),
}

#[derive(Serialize)]
struct CourseAction<'a> {
    user_id: &'a str,
    course_code: &'a str,
}

impl RestBackend {
    pub(crate) fn new(config: &AppConfig, base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout())
            .user_agent(concat!("coursefinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building http client")?;

        Ok(Self {
            client,
            api_url: format!("{}/api", base_url.trim_end_matches('/')),
            search_host: config.search_host.clone().filter(|h| !h.is_empty()),
            search_key: config.search_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> ApiResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");
        let response = self.client.get(&url).query(query).send()?;
        decode(check_status(response, &url)?)
    }

    fn send<B: Serialize>(&self, method: Method, path: &str, body: &B) -> ApiResult<()> {
        let url = self.url(path);
        tracing::debug!(%url, %method, "sending");
        let response = self.client.request(method, &url).json(body).send()?;
        check_status(response, &url)?;
        Ok(())
    }

    fn search_service(&self, host: &str, query: &SearchQuery) -> ApiResult<Option<SearchResultPage>> {
        let Some(request) = typesense::build_request(query) else {
            return Ok(None);
        };

        let url = format!("{}/multi_search", host.trim_end_matches('/'));
        let key = self.search_key.as_deref().unwrap_or_default();

        tracing::debug!(%url, q = %query.q, "multi search");
        let response = self
            .client
            .post(&url)
            .query(&[("x-typesense-api-key", key)])
            .json(&request)
            .send()?;
        let response: typesense::MultiSearchResponse = decode(check_status(response, &url)?)?;

        Ok(Some(response.into_page(query.page)))
    }

    fn backend_search(&self, query: &SearchQuery) -> ApiResult<SearchResultPage> {
        let page = query.page.to_string();
        let response: BackendSearch =
            self.get("/search", &[("query", query.q.as_str()), ("page", &page)])?;

        match response {
            BackendSearch::Page(page) => Ok(page),
            BackendSearch::Multi(multi) => Ok(multi.into_page(query.page)),
            BackendSearch::Courses(courses) => courses_page(courses.into_inner(), query.page),
        }
    }
}

impl CourseBackend for RestBackend {
    fn discover(&self) -> ApiResult<Vec<CourseList>> {
        let lists: Envelope<Vec<CourseList>> = self.get("/discover", &[])?;
        Ok(lists.into_inner())
    }

    fn course_detail(&self, code: &str) -> ApiResult<Course> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Detail {
            One(Envelope<Course>),
            Many(Envelope<Vec<Course>>),
        }

        let detail: Detail = self.get("/details", &[("course_code", code)])?;
        match detail {
            Detail::One(course) => Ok(course.into_inner()),
            Detail::Many(courses) => courses
                .into_inner()
                .into_iter()
                .next()
                .ok_or_else(|| ApiError::NotFound(code.to_string())),
        }
    }

    fn trending(&self) -> ApiResult<TrendingCourses> {
        let trending: Envelope<TrendingCourses> = self.get("/trending", &[])?;
        Ok(trending.into_inner())
    }

    fn all_courses(&self) -> ApiResult<Vec<Course>> {
        let courses: Envelope<Vec<Course>> = self.get("/course/all", &[])?;
        Ok(courses.into_inner())
    }

    fn search(&self, query: &SearchQuery) -> ApiResult<SearchResultPage> {
        if let Some(host) = self.search_host.as_deref() {
            if let Some(page) = self.search_service(host, query)? {
                return Ok(page);
            }
        }
        self.backend_search(query)
    }

    fn set_like(&self, user_id: &str, code: &str, liked: bool) -> ApiResult<()> {
        let method = if liked { Method::POST } else { Method::DELETE };
        self.send(method, "/like", &CourseAction { user_id, course_code: code })
    }

    fn is_liked(&self, user_id: &str, code: &str) -> ApiResult<bool> {
        let liked: Envelope<bool> =
            self.get("/like", &[("user_id", user_id), ("course_code", code)])?;
        Ok(liked.into_inner())
    }

    fn set_watchlisted(&self, user_id: &str, code: &str, watchlisted: bool) -> ApiResult<()> {
        let method = if watchlisted { Method::POST } else { Method::DELETE };
        self.send(method, "/watchlist", &CourseAction { user_id, course_code: code })
    }

    fn is_watchlisted(&self, user_id: &str, code: &str) -> ApiResult<bool> {
        let exists: Envelope<bool> = self.get(
            "/watchlist/exists",
            &[("user_id", user_id), ("course_code", code)],
        )?;
        Ok(exists.into_inner())
    }

    fn watchlist(&self, user_id: &str) -> ApiResult<Vec<Course>> {
        let courses: Envelope<Vec<Course>> = self.get("/watchlist", &[("user_id", user_id)])?;
        Ok(courses.into_inner())
    }

    fn submit_review(&self, review: &Review) -> ApiResult<()> {
        self.send(Method::POST, "/review/putReview", review)
    }

    fn reviews(&self, code: &str) -> ApiResult<Vec<Review>> {
        let path = format!("/review/{}", urlencoding::encode(code));
        let reviews: Envelope<Vec<Review>> = self.get(&path, &[])?;
        Ok(reviews.into_inner())
    }
}

fn check_status(response: Response, url: &str) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.text()?;
    Ok(serde_json::from_str(&body)?)
}

/// Wraps a plain course list as a single result page.
fn courses_page(courses: Vec<Course>, page: u32) -> ApiResult<SearchResultPage> {
    let hits = courses
        .into_iter()
        .map(|course| serde_json::to_value(course).map(|document| Hit { document }))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SearchResultPage {
        found: hits.len() as u64,
        page,
        hits,
        request_params: RequestParams {
            per_page: SEARCH_PER_PAGE,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TrendPeriod;
    use serde_json::json;

    #[test]
    fn envelope_accepts_bare_and_wrapped_bodies() {
        let bare: Envelope<Vec<CourseList>> = serde_json::from_value(json!([
            { "slug": "spms", "name": "SPMS", "courses": [] }
        ]))
        .unwrap();
        assert_eq!(bare.into_inner().len(), 1);

        let wrapped: Envelope<bool> = serde_json::from_value(json!({ "liked": true })).unwrap();
        assert!(wrapped.into_inner());
    }

    #[test]
    fn trending_results_are_keyed_by_period() {
        let trending: Envelope<TrendingCourses> = serde_json::from_value(json!({
            "results": {
                "threeMonths": [{ "code": "SC3004" }],
                "year": [],
            }
        }))
        .unwrap();

        let trending = trending.into_inner();
        assert_eq!(trending[&TrendPeriod::ThreeMonths].len(), 1);
        assert!(!trending.contains_key(&TrendPeriod::SixMonths));
    }

    #[test]
    fn backend_search_accepts_course_lists() {
        let response: BackendSearch =
            serde_json::from_value(json!({ "courses": [{ "code": "MH1811" }] })).unwrap();

        let BackendSearch::Courses(courses) = response else {
            panic!("expected a course list");
        };
        let page = courses_page(courses.into_inner(), 1).unwrap();
        assert_eq!(page.found, 1);
        assert_eq!(page.hits[0].document["code"], "MH1811");
    }

    #[test]
    fn backend_search_prefers_result_pages() {
        let response: BackendSearch = serde_json::from_value(json!({
            "found": 1,
            "page": 1,
            "hits": [{ "document": { "code": "MH1811" } }],
            "request_params": { "per_page": 30 },
        }))
        .unwrap();

        assert!(matches!(response, BackendSearch::Page(_)));
    }
}
