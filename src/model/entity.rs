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

//! Typed display entities parsed from raw search hits.
//!
//! Search documents are opaque JSON whose shape depends on the category that
//! was searched. [`parse_hit`] turns a hit into a [`SearchEntity`], dropping
//! the hit when the document does not have the expected shape.

use serde::Deserialize;
use serde_json::Value;

use crate::model::{Course, SearchCategory, search::Hit};

const UNKNOWN_NAME: &str = "???";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SearchEntity {
    Course(Course),
    Author(Author),
    Series(Series),
    CourseList(ListSummary),
    Character(Character),
    User(UserSummary),
}

impl SearchEntity {
    /// Primary text shown for the entity in a result row.
    pub(crate) fn title(&self) -> &str {
        match self {
            SearchEntity::Course(course) => &course.title,
            SearchEntity::Author(author) => &author.name,
            SearchEntity::Series(series) => &series.name,
            SearchEntity::CourseList(list) => &list.name,
            SearchEntity::Character(character) => &character.name,
            SearchEntity::User(user) => &user.username,
        }
    }

    /// Secondary text shown next to the title.
    pub(crate) fn subtitle(&self) -> String {
        match self {
            SearchEntity::Course(course) => {
                format!("{}  {}", course.code, course.school_name())
            }
            SearchEntity::Author(author) => format!("{} courses", author.courses_count),
            SearchEntity::Series(series) => {
                format!("{}, {} courses", series.author, series.courses_count)
            }
            SearchEntity::CourseList(list) => format!("{} courses", list.courses_count),
            SearchEntity::Character(character) => {
                format!("{}, {} courses", character.author, character.courses_count)
            }
            SearchEntity::User(user) => user.name.clone().unwrap_or_default(),
        }
    }

    /// The course code when this entity can be opened as a course.
    pub(crate) fn course_code(&self) -> Option<&str> {
        match self {
            SearchEntity::Course(course) => Some(&course.code),
            _ => None,
        }
    }

    /// The list slug when this entity can be opened on the discover page.
    pub(crate) fn list_slug(&self) -> Option<&str> {
        match self {
            SearchEntity::CourseList(list) => Some(&list.slug),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Author {
    pub(crate) slug: String,
    pub(crate) name: String,
    pub(crate) courses_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Series {
    pub(crate) slug: String,
    pub(crate) name: String,
    pub(crate) author: String,
    pub(crate) courses_count: u32,
    pub(crate) titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListSummary {
    pub(crate) slug: String,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) courses_count: u32,
    pub(crate) titles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Character {
    pub(crate) slug: String,
    pub(crate) name: String,
    pub(crate) author: String,
    pub(crate) courses_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct UserSummary {
    pub(crate) username: String,
    pub(crate) name: Option<String>,
}

#[derive(Deserialize)]
struct CourseDocument {
    #[serde(alias = "slug")]
    code: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    school: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    likes: Option<u32>,
    #[serde(default)]
    watchlists: Option<u32>,
    #[serde(default)]
    tags: Option<Vec<Option<String>>>,
    #[serde(default)]
    color: Option<String>,
}

#[derive(Deserialize)]
struct NamedDocument {
    slug: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    author_names: Vec<String>,
    #[serde(default, alias = "books_count")]
    courses_count: Option<u32>,
    #[serde(default, alias = "books")]
    courses: Vec<String>,
}

#[derive(Deserialize)]
struct UserDocument {
    username: String,
    #[serde(default)]
    name: Option<String>,
}

/// Parses a raw hit into the entity for `category`.
///
/// Returns `None` when the document does not fit the category. A course
/// without a code, or an entity without a slug, is never displayed.
pub(crate) fn parse_hit(category: SearchCategory, hit: &Hit) -> Option<SearchEntity> {
    let entity = match category {
        SearchCategory::Courses => parse::<CourseDocument>(&hit.document).and_then(course),
        SearchCategory::Users => parse::<UserDocument>(&hit.document).map(|doc| {
            SearchEntity::User(UserSummary {
                username: doc.username,
                name: doc.name,
            })
        }),
        _ => parse::<NamedDocument>(&hit.document).and_then(|doc| named(category, doc)),
    };

    if entity.is_none() {
        tracing::debug!(%category, document = %hit.document, "dropping unparseable search hit");
    }

    entity
}

/// Parses every hit of a page, skipping the ones that fail.
pub(crate) fn parse_hits(category: SearchCategory, hits: &[Hit]) -> Vec<SearchEntity> {
    hits.iter().filter_map(|hit| parse_hit(category, hit)).collect()
}

fn parse<T: for<'de> Deserialize<'de>>(document: &Value) -> Option<T> {
    T::deserialize(document).ok()
}

fn course(doc: CourseDocument) -> Option<SearchEntity> {
    if doc.code.trim().is_empty() {
        return None;
    }

    Some(SearchEntity::Course(Course {
        title: doc.title.unwrap_or_else(|| doc.code.clone()),
        code: doc.code,
        school: doc.school.filter(|s| !s.is_empty()),
        description: doc.description.unwrap_or_default(),
        likes: doc.likes.unwrap_or(0),
        watchlists: doc.watchlists.unwrap_or(0),
        tags: doc.tags.unwrap_or_default().into_iter().flatten().collect(),
        prerequisites: vec![],
        color: doc.color,
    }))
}

fn named(category: SearchCategory, doc: NamedDocument) -> Option<SearchEntity> {
    if doc.slug.trim().is_empty() {
        return None;
    }

    let name = doc.name.unwrap_or_else(|| UNKNOWN_NAME.to_string());
    let courses_count = doc.courses_count.unwrap_or(0);
    let author = doc
        .author_name
        .or_else(|| doc.author_names.first().cloned())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string());

    let entity = match category {
        SearchCategory::Authors => SearchEntity::Author(Author {
            slug: doc.slug,
            name,
            courses_count,
        }),
        SearchCategory::Series => SearchEntity::Series(Series {
            slug: doc.slug,
            name,
            author,
            courses_count,
            titles: doc.courses,
        }),
        SearchCategory::Lists => SearchEntity::CourseList(ListSummary {
            slug: doc.slug,
            name,
            description: doc.description.unwrap_or_default(),
            courses_count,
            titles: doc.courses,
        }),
        SearchCategory::Characters => SearchEntity::Character(Character {
            slug: doc.slug,
            name,
            author,
            courses_count,
        }),
        SearchCategory::Courses | SearchCategory::Users => return None,
    };

    Some(entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(document: Value) -> Hit {
        Hit { document }
    }

    #[test]
    fn parses_course_document() {
        let entity = parse_hit(
            SearchCategory::Courses,
            &hit(json!({
                "code": "SC3004",
                "title": "Data Structures",
                "school": "College of Computing & Data Science",
                "tags": ["algorithms", null],
                "likes": 7,
            })),
        )
        .unwrap();

        let SearchEntity::Course(course) = &entity else {
            panic!("expected a course, got {entity:?}");
        };
        assert_eq!(course.code, "SC3004");
        assert_eq!(course.tags, vec!["algorithms"]);
        assert_eq!(entity.course_code(), Some("SC3004"));
    }

    #[test]
    fn course_slug_is_accepted_as_code() {
        let entity = parse_hit(SearchCategory::Courses, &hit(json!({ "slug": "MH1811" })));
        assert_eq!(entity.and_then(|e| e.course_code().map(String::from)), Some("MH1811".into()));
    }

    #[test]
    fn drops_course_without_code() {
        assert!(parse_hit(SearchCategory::Courses, &hit(json!({ "title": "Orphan" }))).is_none());
        assert!(parse_hit(SearchCategory::Courses, &hit(json!({ "code": "  " }))).is_none());
        assert!(parse_hit(SearchCategory::Courses, &hit(json!("not an object"))).is_none());
    }

    #[test]
    fn character_falls_back_to_unknown_author() {
        let entity = parse_hit(
            SearchCategory::Characters,
            &hit(json!({ "slug": "ada", "name": "Ada", "courses_count": 2 })),
        );

        match entity {
            Some(SearchEntity::Character(c)) => {
                assert_eq!(c.author, UNKNOWN_NAME);
                assert_eq!(c.courses_count, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn list_titles_are_kept() {
        let entity = parse_hit(
            SearchCategory::Lists,
            &hit(json!({
                "slug": "spms-core",
                "name": "SPMS Core",
                "courses": ["Mathematics 2"],
                "courses_count": 1,
            })),
        );

        let Some(SearchEntity::CourseList(list)) = entity else {
            panic!("expected a list");
        };
        assert_eq!(list.titles, vec!["Mathematics 2"]);
    }

    #[test]
    fn parse_hits_skips_failures() {
        let hits = vec![
            hit(json!({ "code": "SC3004" })),
            hit(json!({ "nope": true })),
            hit(json!({ "code": "MH1811" })),
        ];

        let parsed = parse_hits(SearchCategory::Courses, &hits);
        assert_eq!(parsed.len(), 2);
    }
}
