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

//! Persisted search history.

use rusqlite::{Connection, Result, params};

use crate::{model::SearchCategory, search::history::HistoryEntry};

/// Appends a search and drops the oldest entries of its category beyond
/// `limit`.
pub(crate) fn append_history(conn: &mut Connection, entry: &HistoryEntry, limit: usize) -> Result<()> {
    let tx = conn.transaction()?;

    tx.prepare_cached("INSERT INTO search_history (category, q) VALUES (?1, ?2)")?
        .execute(params![entry.category, entry.q])?;

    tx.prepare_cached(
        "DELETE FROM search_history
         WHERE category = ?1 AND id NOT IN (
             SELECT id FROM search_history WHERE category = ?1 ORDER BY id DESC LIMIT ?2
         )",
    )?
    .execute(params![entry.category, limit as i64])?;

    tx.commit()
}

/// All stored entries, oldest first.
pub(crate) fn load_history(conn: &Connection) -> Result<Vec<HistoryEntry>> {
    conn.prepare_cached("SELECT category, q FROM search_history ORDER BY id")?
        .query_map([], |r| {
            Ok(HistoryEntry {
                category: r.get(0)?,
                q: r.get(1)?,
            })
        })?
        .collect()
}

pub(crate) fn clear_history(conn: &Connection, category: SearchCategory) -> Result<usize> {
    conn.prepare_cached("DELETE FROM search_history WHERE category = ?1")?
        .execute([category])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_memory_db;

    fn entry(category: SearchCategory, q: &str) -> HistoryEntry {
        HistoryEntry {
            category,
            q: q.to_string(),
        }
    }

    #[test]
    fn keeps_newest_per_category() {
        let mut conn = init_memory_db().unwrap();
        for q in ["a", "b", "c", "d"] {
            append_history(&mut conn, &entry(SearchCategory::Courses, q), 3).unwrap();
        }
        append_history(&mut conn, &entry(SearchCategory::Lists, "x"), 3).unwrap();

        let stored = load_history(&conn).unwrap();
        assert_eq!(
            stored,
            vec![
                entry(SearchCategory::Courses, "b"),
                entry(SearchCategory::Courses, "c"),
                entry(SearchCategory::Courses, "d"),
                entry(SearchCategory::Lists, "x"),
            ]
        );
    }

    #[test]
    fn clear_only_touches_one_category() {
        let mut conn = init_memory_db().unwrap();
        append_history(&mut conn, &entry(SearchCategory::Courses, "a"), 10).unwrap();
        append_history(&mut conn, &entry(SearchCategory::Users, "b"), 10).unwrap();

        assert_eq!(clear_history(&conn, SearchCategory::Courses).unwrap(), 1);
        assert_eq!(load_history(&conn).unwrap(), vec![entry(SearchCategory::Users, "b")]);
    }
}
