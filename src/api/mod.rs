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

//! Course data backends.
//!
//! All remote data goes through a [`CourseBackend`]. Two implementations
//! exist: [`rest::RestBackend`] talks to the CourseFinder API and the search
//! service over HTTP, [`local::LocalBackend`] answers from the SQLite
//! database with a seeded demo catalog. Backend calls block and are only ever
//! made from task worker threads.

pub(crate) mod local;
pub(crate) mod rest;
pub(crate) mod typesense;

use thiserror::Error;

use crate::{
    config::AppConfig,
    model::{
        Course, CourseList, Review, TrendingCourses,
        search::{SearchQuery, SearchResultPage},
    },
};

#[derive(Debug, Error)]
pub(crate) enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("not found: {0}")]
    NotFound(String),
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Access to course data, one instance per worker thread.
pub(crate) trait CourseBackend: Send {
    fn discover(&self) -> ApiResult<Vec<CourseList>>;

    fn course_detail(&self, code: &str) -> ApiResult<Course>;

    fn trending(&self) -> ApiResult<TrendingCourses>;

    fn all_courses(&self) -> ApiResult<Vec<Course>>;

    fn search(&self, query: &SearchQuery) -> ApiResult<SearchResultPage>;

    fn set_like(&self, user_id: &str, code: &str, liked: bool) -> ApiResult<()>;

    fn is_liked(&self, user_id: &str, code: &str) -> ApiResult<bool>;

    fn set_watchlisted(&self, user_id: &str, code: &str, watchlisted: bool) -> ApiResult<()>;

    fn is_watchlisted(&self, user_id: &str, code: &str) -> ApiResult<bool>;

    fn watchlist(&self, user_id: &str) -> ApiResult<Vec<Course>>;

    fn submit_review(&self, review: &Review) -> ApiResult<()>;

    fn reviews(&self, code: &str) -> ApiResult<Vec<Review>>;
}

/// Opens the backend selected by the configuration: the REST API when a base
/// URL is configured, the local database otherwise.
pub(crate) fn open_backend(config: &AppConfig) -> anyhow::Result<Box<dyn CourseBackend>> {
    match config.api_base_url.as_deref().filter(|url| !url.is_empty()) {
        Some(base_url) => {
            tracing::info!(base_url, "using REST backend");
            Ok(Box::new(rest::RestBackend::new(config, base_url)?))
        }
        None => {
            tracing::info!("using local backend");
            Ok(Box::new(local::LocalBackend::open(&config.database_path()?)?))
        }
    }
}
