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

//! Database row mapping for domain models.
//!
//! This module provides the conversion logic between raw SQLite result rows
//! and high-level domain models, ensuring type-safe extraction of model
//! attributes from database queries.

use rusqlite::{
    Result, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};

use crate::model::{Course, Review, ReviewScore, SearchCategory};

impl Course {
    /// Maps an SQLite row to a [`Course`] instance.
    ///
    /// Tags are stored in their own table and are left empty here.
    ///
    /// # Errors
    ///
    /// Returns a [`rusqlite::Error`] if:
    /// * The row does not contain enough columns.
    /// * The data in a column cannot be converted to the required Rust type.
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        let prerequisites: String = row.get(7)?;
        Ok(Self {
            code: row.get(0)?,
            title: row.get(1)?,
            school: row.get(2)?,
            description: row.get(3)?,
            likes: row.get(4)?,
            watchlists: row.get(5)?,
            color: row.get(6)?,
            tags: vec![],
            prerequisites: prerequisites
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

impl Review {
    pub(crate) fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            course_code: row.get(0)?,
            author: row.get(1)?,
            description: row.get(2)?,
            recommended: row.get(3)?,
            score: ReviewScore {
                content_usefulness: row.get(4)?,
                lecture_clarity: row.get(5)?,
                assignment_difficulty: row.get(6)?,
                team_dependency: row.get(7)?,
                overall_workload: row.get(8)?,
            },
        })
    }
}

impl ToSql for SearchCategory {
    fn to_sql(&self) -> Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for SearchCategory {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}
