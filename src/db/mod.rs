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

//! Data access layer.
//!
//! This module handles all interactions with the SQLite database, including
//! schema creation, the course catalog served by the local backend, user
//! likes and watchlists, reviews and the persisted search history.
//!
//! # Tables
//!
//! * `courses` - One row per course, keyed by course code.
//! * `course_tags` - Ordered tags for each course.
//! * `course_lists` / `course_list_items` - Curated lists of courses.
//! * `likes` / `watchlist` - Per-user course marks, timestamped.
//! * `reviews` - Course reviews with their five dimension scores.
//! * `search_history` - Submitted searches, capped per category.
//!
//! # Performance
//!
//! Most functions in this module use [`rusqlite::Connection::prepare_cached`]
//! to reduce SQL parsing overhead.

pub(crate) mod history;
mod model;
pub(crate) mod seed;

use std::path::Path;

use anyhow::Context;
use rusqlite::{Connection, OptionalExtension, Result, params};

use crate::model::{Course, CourseList, Review, TrendPeriod};

const COURSE_COLUMNS: &str =
    "c.code, c.title, c.school, c.description, c.likes, c.watchlists, c.color, c.prerequisites";

/// Opens a connection to the SQLite database and configures performance settings.
///
/// This function performs the following setup:
/// * **WAL Mode**: Enables Write-Ahead Logging so several worker connections
///   can read while one writes.
/// * **Performance Tuning**: Sets synchronous mode to `NORMAL` and increases the cache size.
/// * **Constraints**: Enforces foreign key integrity.
/// * **Schema**: Executes [`create_schema`] to ensure all tables and indices exist.
///
/// # Errors
///
/// Returns an error if:
/// * The database file cannot be opened.
/// * The initial PRAGMA configurations fail.
/// * The schema initialization fails.
pub(crate) fn init_db(path: &Path) -> anyhow::Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;

    let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
    if journal_mode != "wal" {
        anyhow::bail!(
            "Failed to switch to WAL mode. Current mode: {}",
            journal_mode
        );
    }

    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA cache_size = -16000; -- Use 16MB of RAM for cache
    ",
    )?;

    conn.set_prepared_statement_cache_capacity(100);

    create_schema(&conn)?;

    Ok(conn)
}

/// Opens a private in-memory database with the full schema.
#[cfg(test)]
pub(crate) fn init_memory_db() -> anyhow::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

/// Create the database schema.
///
/// All tables are created if they do not already exist, inside a single
/// transaction so the schema is updated atomically. Deleting a course or a
/// list cascades to its tags, list items, marks and reviews.
fn create_schema(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "BEGIN;

        CREATE TABLE IF NOT EXISTS courses (
            code TEXT PRIMARY KEY COLLATE NOCASE,
            title TEXT NOT NULL,
            school TEXT,
            description TEXT NOT NULL DEFAULT '',
            likes INTEGER NOT NULL DEFAULT 0,
            watchlists INTEGER NOT NULL DEFAULT 0,
            color TEXT,
            prerequisites TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS course_tags (
            course_code TEXT NOT NULL,
            position INTEGER NOT NULL,
            tag TEXT NOT NULL,
            PRIMARY KEY (course_code, tag),
            FOREIGN KEY (course_code) REFERENCES courses (code) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS course_lists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            slug TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS course_list_items (
            list_id INTEGER NOT NULL,
            course_code TEXT NOT NULL,
            position INTEGER NOT NULL,
            PRIMARY KEY (list_id, course_code),
            FOREIGN KEY (list_id) REFERENCES course_lists (id) ON DELETE CASCADE,
            FOREIGN KEY (course_code) REFERENCES courses (code) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS likes (
            user_id TEXT NOT NULL,
            course_code TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (unixepoch()),
            PRIMARY KEY (user_id, course_code),
            FOREIGN KEY (course_code) REFERENCES courses (code) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_likes_created_at ON likes (created_at);

        CREATE TABLE IF NOT EXISTS watchlist (
            user_id TEXT NOT NULL,
            course_code TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (unixepoch()),
            PRIMARY KEY (user_id, course_code),
            FOREIGN KEY (course_code) REFERENCES courses (code) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS reviews (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            course_code TEXT NOT NULL,
            author TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            recommended INTEGER NOT NULL DEFAULT 0,
            content_usefulness INTEGER NOT NULL,
            lecture_clarity INTEGER NOT NULL,
            assignment_difficulty INTEGER NOT NULL,
            team_dependency INTEGER NOT NULL,
            overall_workload INTEGER NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (unixepoch()),
            FOREIGN KEY (course_code) REFERENCES courses (code) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_reviews_course_code ON reviews (course_code);

        CREATE TABLE IF NOT EXISTS search_history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            category TEXT NOT NULL,
            q TEXT NOT NULL,
            created_at INTEGER NOT NULL DEFAULT (unixepoch())
        );

        CREATE INDEX IF NOT EXISTS idx_search_history_category ON search_history (category);

        COMMIT;",
    )
    .context("Failed to create schema")
}

pub(crate) fn course_count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM courses", [], |r| r.get(0))
}

/// Inserts or replaces a course together with its tags.
pub(crate) fn upsert_course(conn: &Connection, course: &Course) -> Result<()> {
    let sql = "
        INSERT INTO courses (code, title, school, description, likes, watchlists, color, prerequisites)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT (code) DO UPDATE SET
            title = ?2, school = ?3, description = ?4, likes = ?5,
            watchlists = ?6, color = ?7, prerequisites = ?8";

    conn.prepare_cached(sql)?.execute(params![
        course.code,
        course.title,
        course.school,
        course.description,
        course.likes,
        course.watchlists,
        course.color,
        course.prerequisites.join(","),
    ])?;

    conn.prepare_cached("DELETE FROM course_tags WHERE course_code = ?1")?
        .execute([&course.code])?;

    let mut stmt =
        conn.prepare_cached("INSERT OR IGNORE INTO course_tags (course_code, position, tag) VALUES (?1, ?2, ?3)")?;
    for (position, tag) in course.tags.iter().enumerate() {
        stmt.execute(params![course.code, position as i64, tag])?;
    }

    Ok(())
}

/// Inserts a list and its items. Items must refer to existing courses.
pub(crate) fn insert_course_list(conn: &Connection, list: &CourseList) -> Result<i64> {
    conn.prepare_cached("INSERT INTO course_lists (slug, name, description) VALUES (?1, ?2, ?3)")?
        .execute(params![list.slug, list.name, list.description])?;
    let list_id = conn.last_insert_rowid();

    let mut stmt = conn.prepare_cached(
        "INSERT OR IGNORE INTO course_list_items (list_id, course_code, position) VALUES (?1, ?2, ?3)",
    )?;
    for (position, course) in list.courses.iter().enumerate() {
        stmt.execute(params![list_id, course.code, position as i64])?;
    }

    Ok(list_id)
}

fn fetch_tags(conn: &Connection, code: &str) -> Result<Vec<String>> {
    conn.prepare_cached("SELECT tag FROM course_tags WHERE course_code = ?1 ORDER BY position")?
        .query_map([code], |r| r.get(0))?
        .collect()
}

fn attach_tags(conn: &Connection, courses: &mut [Course]) -> Result<()> {
    for course in courses.iter_mut() {
        course.tags = fetch_tags(conn, &course.code)?;
    }
    Ok(())
}

fn query_courses(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Course>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let mut courses = stmt
        .query_map(params, Course::from_row)?
        .collect::<Result<Vec<_>>>()?;
    attach_tags(conn, &mut courses)?;
    Ok(courses)
}

pub(crate) fn fetch_course(conn: &Connection, code: &str) -> Result<Option<Course>> {
    let sql = format!("SELECT {COURSE_COLUMNS} FROM courses c WHERE c.code = ?1");
    let Some(mut course) = conn
        .prepare_cached(&sql)?
        .query_row([code], Course::from_row)
        .optional()?
    else {
        return Ok(None);
    };

    course.tags = fetch_tags(conn, &course.code)?;
    Ok(Some(course))
}

pub(crate) fn fetch_all_courses(conn: &Connection) -> Result<Vec<Course>> {
    let sql = format!("SELECT {COURSE_COLUMNS} FROM courses c ORDER BY c.code");
    query_courses(conn, &sql, [])
}

/// Fetches every course list with its courses in list order.
pub(crate) fn fetch_course_lists(conn: &Connection) -> Result<Vec<CourseList>> {
    let mut stmt =
        conn.prepare_cached("SELECT id, slug, name, description FROM course_lists ORDER BY id")?;
    let lists = stmt
        .query_map([], |r| {
            Ok((
                r.get::<_, i64>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>>>()?;

    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM course_list_items i
         JOIN courses c ON c.code = i.course_code
         WHERE i.list_id = ?1
         ORDER BY i.position"
    );

    lists
        .into_iter()
        .map(|(id, slug, name, description)| {
            Ok(CourseList {
                key: slug.clone(),
                slug,
                name,
                description,
                courses: query_courses(conn, &sql, [id])?,
            })
        })
        .collect()
}

/// Courses ranked by likes received within the period, then by overall
/// likes.
pub(crate) fn fetch_trending(conn: &Connection, period: TrendPeriod, limit: usize) -> Result<Vec<Course>> {
    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses c
         LEFT JOIN (
             SELECT course_code, COUNT(*) AS recent
             FROM likes
             WHERE created_at >= unixepoch('now', ?1)
             GROUP BY course_code
         ) l ON l.course_code = c.code
         ORDER BY COALESCE(l.recent, 0) DESC, c.likes DESC, c.code
         LIMIT ?2"
    );
    let modifier = format!("-{} months", period.months());
    query_courses(conn, &sql, params![modifier, limit as i64])
}

/// Escapes `q` for a case-insensitive `LIKE ... ESCAPE '\'` substring match.
fn like_pattern(q: &str) -> String {
    let escaped = q
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// One page of courses matching `q`, with the total match count.
pub(crate) fn search_courses(
    conn: &Connection,
    q: &str,
    page: u32,
    per_page: u32,
) -> Result<(u64, Vec<Course>)> {
    let filter = "
        c.code LIKE ?1 ESCAPE '\\' OR c.title LIKE ?1 ESCAPE '\\'
        OR c.school LIKE ?1 ESCAPE '\\' OR c.description LIKE ?1 ESCAPE '\\'
        OR EXISTS (SELECT 1 FROM course_tags t WHERE t.course_code = c.code AND t.tag LIKE ?1 ESCAPE '\\')";

    let pattern = like_pattern(q);

    let found: i64 = conn
        .prepare_cached(&format!("SELECT COUNT(*) FROM courses c WHERE {filter}"))?
        .query_row([&pattern], |r| r.get(0))?;

    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM courses c WHERE {filter}
         ORDER BY c.likes DESC, c.code
         LIMIT ?2 OFFSET ?3"
    );
    let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);
    let courses = query_courses(conn, &sql, params![pattern, per_page, offset])?;

    Ok((found as u64, courses))
}

/// One page of course lists matching `q`, with the total match count.
pub(crate) fn search_lists(
    conn: &Connection,
    q: &str,
    page: u32,
    per_page: u32,
) -> Result<(u64, Vec<CourseList>)> {
    let pattern = like_pattern(q);
    let filter = "l.name LIKE ?1 ESCAPE '\\' OR l.description LIKE ?1 ESCAPE '\\'";

    let found: i64 = conn
        .prepare_cached(&format!("SELECT COUNT(*) FROM course_lists l WHERE {filter}"))?
        .query_row([&pattern], |r| r.get(0))?;

    let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT l.slug FROM course_lists l WHERE {filter} ORDER BY l.name LIMIT ?2 OFFSET ?3"
    ))?;
    let slugs = stmt
        .query_map(params![pattern, per_page, offset], |r| r.get::<_, String>(0))?
        .collect::<Result<Vec<_>>>()?;

    let lists = fetch_course_lists(conn)?
        .into_iter()
        .filter(|list| slugs.contains(&list.slug))
        .collect();

    Ok((found as u64, lists))
}

/// One page of known usernames matching `q`, with the total match count.
pub(crate) fn search_users(
    conn: &Connection,
    q: &str,
    page: u32,
    per_page: u32,
) -> Result<(u64, Vec<String>)> {
    let users = "
        SELECT user_id AS username FROM likes
        UNION SELECT user_id FROM watchlist
        UNION SELECT author FROM reviews";
    let pattern = like_pattern(q);

    let found: i64 = conn
        .prepare_cached(&format!(
            "SELECT COUNT(*) FROM ({users}) WHERE username LIKE ?1 ESCAPE '\\'"
        ))?
        .query_row([&pattern], |r| r.get(0))?;

    let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);
    let mut stmt = conn.prepare_cached(&format!(
        "SELECT username FROM ({users}) WHERE username LIKE ?1 ESCAPE '\\'
         ORDER BY username LIMIT ?2 OFFSET ?3"
    ))?;
    let names = stmt
        .query_map(params![pattern, per_page, offset], |r| r.get(0))?
        .collect::<Result<Vec<String>>>()?;

    Ok((found as u64, names))
}

/// Adds or removes a like, keeping the course's like count in step.
///
/// Returns false when nothing changed (already liked, or not liked).
pub(crate) fn set_like(conn: &mut Connection, user_id: &str, code: &str, liked: bool) -> Result<bool> {
    set_mark(conn, "likes", "likes", user_id, code, liked)
}

pub(crate) fn is_liked(conn: &Connection, user_id: &str, code: &str) -> Result<bool> {
    has_mark(conn, "likes", user_id, code)
}

pub(crate) fn set_watchlisted(
    conn: &mut Connection,
    user_id: &str,
    code: &str,
    watchlisted: bool,
) -> Result<bool> {
    set_mark(conn, "watchlist", "watchlists", user_id, code, watchlisted)
}

pub(crate) fn is_watchlisted(conn: &Connection, user_id: &str, code: &str) -> Result<bool> {
    has_mark(conn, "watchlist", user_id, code)
}

pub(crate) fn fetch_watchlist(conn: &Connection, user_id: &str) -> Result<Vec<Course>> {
    let sql = format!(
        "SELECT {COURSE_COLUMNS} FROM watchlist w
         JOIN courses c ON c.code = w.course_code
         WHERE w.user_id = ?1
         ORDER BY w.created_at DESC, c.code"
    );
    query_courses(conn, &sql, [user_id])
}

fn set_mark(
    conn: &mut Connection,
    table: &str,
    counter: &str,
    user_id: &str,
    code: &str,
    marked: bool,
) -> Result<bool> {
    let tx = conn.transaction()?;

    let changed = if marked {
        tx.execute(
            &format!("INSERT OR IGNORE INTO {table} (user_id, course_code) VALUES (?1, ?2)"),
            [user_id, code],
        )?
    } else {
        tx.execute(
            &format!("DELETE FROM {table} WHERE user_id = ?1 AND course_code = ?2"),
            [user_id, code],
        )?
    };

    if changed > 0 {
        let delta = if marked { 1 } else { -1 };
        tx.execute(
            &format!("UPDATE courses SET {counter} = MAX(0, {counter} + ?1) WHERE code = ?2"),
            params![delta, code],
        )?;
    }

    tx.commit()?;
    Ok(changed > 0)
}

fn has_mark(conn: &Connection, table: &str, user_id: &str, code: &str) -> Result<bool> {
    conn.prepare_cached(&format!(
        "SELECT EXISTS (SELECT 1 FROM {table} WHERE user_id = ?1 AND course_code = ?2)"
    ))?
    .query_row([user_id, code], |r| r.get(0))
}

pub(crate) fn insert_review(conn: &Connection, review: &Review) -> Result<()> {
    let sql = "
        INSERT INTO reviews (
            course_code, author, description, recommended,
            content_usefulness, lecture_clarity, assignment_difficulty,
            team_dependency, overall_workload
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

    let score = &review.score;
    conn.prepare_cached(sql)?.execute(params![
        review.course_code,
        review.author,
        review.description,
        review.recommended,
        score.content_usefulness,
        score.lecture_clarity,
        score.assignment_difficulty,
        score.team_dependency,
        score.overall_workload,
    ])?;

    Ok(())
}

pub(crate) fn fetch_reviews(conn: &Connection, code: &str) -> Result<Vec<Review>> {
    let sql = "
        SELECT course_code, author, description, recommended,
               content_usefulness, lecture_clarity, assignment_difficulty,
               team_dependency, overall_workload
        FROM reviews
        WHERE course_code = ?1
        ORDER BY created_at DESC, id DESC";

    conn.prepare_cached(sql)?
        .query_map([code], Review::from_row)?
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReviewScore;

    fn db() -> Connection {
        let mut conn = init_memory_db().unwrap();
        seed::seed_demo_catalog(&mut conn).unwrap();
        conn
    }

    #[test]
    fn wal_database_opens_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let conn = init_db(&dir.path().join("coursefinder.db")).unwrap();
        assert_eq!(course_count(&conn).unwrap(), 0);
    }

    #[test]
    fn course_round_trips_with_tags() {
        let conn = db();
        let course = fetch_course(&conn, "MH1811").unwrap().unwrap();

        assert_eq!(course.title, "Mathematics 2");
        assert_eq!(course.school.as_deref(), Some("SPMS"));
        assert!(course.has_tag("sequences"));
        assert!(fetch_course(&conn, "XX9999").unwrap().is_none());
    }

    #[test]
    fn course_lookup_ignores_case() {
        let conn = db();
        assert!(fetch_course(&conn, "mh1811").unwrap().is_some());
    }

    #[test]
    fn lists_keep_their_order() {
        let conn = db();
        let lists = fetch_course_lists(&conn).unwrap();
        let spms = lists.iter().find(|l| l.slug == "spms").unwrap();

        assert!(!spms.courses.is_empty());
        assert!(spms.courses.iter().all(|c| c.school.as_deref() == Some("SPMS")));
    }

    #[test]
    fn search_pages_and_counts() {
        let conn = db();
        let (found, first) = search_courses(&conn, "m", 1, 2).unwrap();
        let (_, second) = search_courses(&conn, "m", 2, 2).unwrap();

        assert!(found > 2);
        assert_eq!(first.len(), 2);
        assert!(first.iter().all(|c| !second.contains(c)));
    }

    #[test]
    fn search_treats_wildcards_literally() {
        let conn = db();
        let (found, _) = search_courses(&conn, "%", 1, 30).unwrap();
        assert_eq!(found, 0);
    }

    #[test]
    fn like_updates_count_once() {
        let mut conn = db();

        assert!(set_like(&mut conn, "roland", "MH1811", true).unwrap());
        assert!(!set_like(&mut conn, "roland", "MH1811", true).unwrap());
        assert!(is_liked(&conn, "roland", "MH1811").unwrap());
        assert_eq!(fetch_course(&conn, "MH1811").unwrap().unwrap().likes, 1);

        assert!(set_like(&mut conn, "roland", "MH1811", false).unwrap());
        assert_eq!(fetch_course(&conn, "MH1811").unwrap().unwrap().likes, 0);
    }

    #[test]
    fn recent_likes_lead_trending() {
        let mut conn = db();
        set_like(&mut conn, "a", "MH1811", true).unwrap();
        set_like(&mut conn, "b", "MH1811", true).unwrap();

        let trending = fetch_trending(&conn, TrendPeriod::ThreeMonths, 5).unwrap();
        assert_eq!(trending[0].code, "MH1811");
        assert!(trending.len() <= 5);
    }

    #[test]
    fn watchlist_lists_marked_courses() {
        let mut conn = db();
        set_watchlisted(&mut conn, "roland", "SC3004", true).unwrap();

        let courses = fetch_watchlist(&conn, "roland").unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].watchlists, 1);
        assert!(fetch_watchlist(&conn, "someone").unwrap().is_empty());
    }

    #[test]
    fn reviews_are_stored_with_scores() {
        let conn = db();
        let review = Review {
            course_code: "SC3004".into(),
            author: "roland".into(),
            description: "Great".into(),
            recommended: true,
            score: ReviewScore {
                lecture_clarity: 5,
                ..ReviewScore::default()
            },
        };
        insert_review(&conn, &review).unwrap();

        assert_eq!(fetch_reviews(&conn, "SC3004").unwrap(), vec![review]);
    }

    #[test]
    fn users_come_from_activity() {
        let mut conn = db();
        set_like(&mut conn, "roland", "SC3004", true).unwrap();

        let (found, names) = search_users(&conn, "rol", 1, 30).unwrap();
        assert_eq!(found, 1);
        assert_eq!(names, vec!["roland"]);
    }
}
