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

//! Offline backend answering from the SQLite database.

use std::{
    path::Path,
    sync::{Mutex, MutexGuard, PoisonError},
};

use anyhow::Context;
use rusqlite::Connection;
use serde_json::json;

use crate::{
    api::{ApiError, ApiResult, CourseBackend},
    db,
    model::{
        Course, CourseList, Review, SearchCategory, TrendPeriod, TrendingCourses,
        search::{Hit, RequestParams, SEARCH_PER_PAGE, SearchQuery, SearchResultPage},
    },
};

const TRENDING_LIMIT: usize = 10;

pub(crate) struct LocalBackend {
    conn: Mutex<Connection>,
}

impl LocalBackend {
    /// Opens the database at `path`, seeding the demo catalog on first use.
    pub(crate) fn open(path: &Path) -> anyhow::Result<Self> {
        let mut conn = db::init_db(path)?;
        db::seed::seed_demo_catalog(&mut conn).context("Failed to seed demo catalog")?;
        Ok(Self::with_connection(conn))
    }

    pub(crate) fn with_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Seeded in-memory backend.
    #[cfg(test)]
    pub(crate) fn open_in_memory() -> anyhow::Result<Self> {
        let mut conn = db::init_memory_db()?;
        db::seed::seed_demo_catalog(&mut conn)?;
        Ok(Self::with_connection(conn))
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn page_of(found: u64, page: u32, documents: Vec<serde_json::Value>) -> SearchResultPage {
    SearchResultPage {
        found,
        page,
        hits: documents.into_iter().map(|document| Hit { document }).collect(),
        request_params: RequestParams {
            per_page: SEARCH_PER_PAGE,
        },
    }
}

fn list_document(list: &CourseList) -> serde_json::Value {
    json!({
        "slug": list.slug,
        "name": list.name,
        "description": list.description,
        "courses_count": list.courses.len(),
        "courses": list.courses.iter().map(|c| c.title.as_str()).collect::<Vec<_>>(),
    })
}

impl CourseBackend for LocalBackend {
    fn discover(&self) -> ApiResult<Vec<CourseList>> {
        Ok(db::fetch_course_lists(&self.conn())?)
    }

    fn course_detail(&self, code: &str) -> ApiResult<Course> {
        db::fetch_course(&self.conn(), code)?.ok_or_else(|| ApiError::NotFound(code.to_string()))
    }

    fn trending(&self) -> ApiResult<TrendingCourses> {
        let conn = self.conn();
        TrendPeriod::ALL
            .into_iter()
            .map(|period| -> ApiResult<_> {
                Ok((period, db::fetch_trending(&conn, period, TRENDING_LIMIT)?))
            })
            .collect()
    }

    fn all_courses(&self) -> ApiResult<Vec<Course>> {
        Ok(db::fetch_all_courses(&self.conn())?)
    }

    fn search(&self, query: &SearchQuery) -> ApiResult<SearchResultPage> {
        let conn = self.conn();
        let (q, page) = (query.q.as_str(), query.page);

        let (found, documents) = match query.category {
            SearchCategory::Courses => {
                let (found, courses) = db::search_courses(&conn, q, page, SEARCH_PER_PAGE)?;
                let documents = courses
                    .iter()
                    .map(serde_json::to_value)
                    .collect::<Result<Vec<_>, _>>()?;
                (found, documents)
            }
            SearchCategory::Lists => {
                let (found, lists) = db::search_lists(&conn, q, page, SEARCH_PER_PAGE)?;
                (found, lists.iter().map(list_document).collect())
            }
            SearchCategory::Users => {
                let (found, names) = db::search_users(&conn, q, page, SEARCH_PER_PAGE)?;
                let documents = names
                    .into_iter()
                    .map(|username| json!({ "username": username }))
                    .collect();
                (found, documents)
            }
            SearchCategory::Authors | SearchCategory::Series | SearchCategory::Characters => {
                tracing::debug!(category = %query.category, "category not available offline");
                (0, vec![])
            }
        };

        Ok(page_of(found, page, documents))
    }

    fn set_like(&self, user_id: &str, code: &str, liked: bool) -> ApiResult<()> {
        db::set_like(&mut self.conn(), user_id, code, liked)?;
        Ok(())
    }

    fn is_liked(&self, user_id: &str, code: &str) -> ApiResult<bool> {
        Ok(db::is_liked(&self.conn(), user_id, code)?)
    }

    fn set_watchlisted(&self, user_id: &str, code: &str, watchlisted: bool) -> ApiResult<()> {
        db::set_watchlisted(&mut self.conn(), user_id, code, watchlisted)?;
        Ok(())
    }

    fn is_watchlisted(&self, user_id: &str, code: &str) -> ApiResult<bool> {
        Ok(db::is_watchlisted(&self.conn(), user_id, code)?)
    }

    fn watchlist(&self, user_id: &str) -> ApiResult<Vec<Course>> {
        Ok(db::fetch_watchlist(&self.conn(), user_id)?)
    }

    fn submit_review(&self, review: &Review) -> ApiResult<()> {
        let conn = self.conn();
        if db::fetch_course(&conn, &review.course_code)?.is_none() {
            return Err(ApiError::NotFound(review.course_code.clone()));
        }
        Ok(db::insert_review(&conn, review)?)
    }

    fn reviews(&self, code: &str) -> ApiResult<Vec<Review>> {
        Ok(db::fetch_reviews(&self.conn(), code)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReviewScore, entity::parse_hits};

    fn backend() -> LocalBackend {
        LocalBackend::open_in_memory().unwrap()
    }

    #[test]
    fn opens_and_seeds_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::open(&dir.path().join("courses.db")).unwrap();
        assert!(!backend.all_courses().unwrap().is_empty());
    }

    #[test]
    fn search_hits_parse_as_courses() {
        let backend = backend();
        let page = backend
            .search(&SearchQuery::new("t", 1, SearchCategory::Courses))
            .unwrap();

        assert!(page.found > 0);
        assert_eq!(page.page, 1);
        assert_eq!(
            parse_hits(SearchCategory::Courses, &page.hits).len(),
            page.hits.len()
        );
    }

    #[test]
    fn list_hits_parse_as_lists() {
        let backend = backend();
        let page = backend
            .search(&SearchQuery::new("computing", 1, SearchCategory::Lists))
            .unwrap();

        let entities = parse_hits(SearchCategory::Lists, &page.hits);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].list_slug(), Some("ccds"));
    }

    #[test]
    fn unavailable_categories_are_empty() {
        let backend = backend();
        let page = backend
            .search(&SearchQuery::new("t", 1, SearchCategory::Authors))
            .unwrap();
        assert_eq!(page.found, 0);
    }

    #[test]
    fn missing_course_is_not_found() {
        let backend = backend();
        assert!(matches!(
            backend.course_detail("XX0000"),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn trending_covers_every_period() {
        let trending = backend().trending().unwrap();
        assert_eq!(trending.len(), TrendPeriod::ALL.len());
        assert!(trending.values().all(|courses| courses.len() <= TRENDING_LIMIT));
    }

    #[test]
    fn like_and_watchlist_round_trip() {
        let backend = backend();
        backend.set_like("roland", "MH1811", true).unwrap();
        backend.set_watchlisted("roland", "MH1811", true).unwrap();

        assert!(backend.is_liked("roland", "MH1811").unwrap());
        assert!(backend.is_watchlisted("roland", "MH1811").unwrap());
        assert_eq!(backend.course_detail("MH1811").unwrap().likes, 1);
        assert_eq!(backend.watchlist("roland").unwrap()[0].code, "MH1811");
    }

    #[test]
    fn review_for_unknown_course_is_rejected() {
        let backend = backend();
        let review = Review {
            course_code: "XX0000".into(),
            author: "roland".into(),
            description: String::new(),
            recommended: false,
            score: ReviewScore::default(),
        };
        assert!(backend.submit_review(&review).is_err());
    }
}
