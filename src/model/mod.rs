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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, such as
//! courses, curated course lists and reviews, together with the enumerations
//! used to address them (search categories, trend periods).
//!
//! There is exactly one [`Course`] schema; every backend, view and search
//! document parser converts into it.

pub(crate) mod entity;
pub(crate) mod search;

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};

/// A university course.
///
/// The course code doubles as the key and the slug used in routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Course {
    pub(crate) code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) school: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) likes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) watchlists: u32,
    #[serde(default, deserialize_with = "present_items")]
    pub(crate) tags: Vec<String>,
    #[serde(default, deserialize_with = "present_items")]
    pub(crate) prerequisites: Vec<String>,
    #[serde(default)]
    pub(crate) color: Option<String>,
}

impl Course {
    pub(crate) fn key(&self) -> &str {
        &self.code
    }

    pub(crate) fn school_name(&self) -> &str {
        self.school.as_deref().unwrap_or("")
    }

    pub(crate) fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A curated list of courses, typically one per faculty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CourseList {
    #[serde(default)]
    pub(crate) key: String,
    pub(crate) slug: String,
    pub(crate) name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) username: String,
}

impl User {
    /// Builds a user from a bare username, the username doubles as the id.
    pub(crate) fn from_username(username: &str) -> Self {
        Self {
            id: username.to_string(),
            username: username.to_string(),
        }
    }
}

/// Per-dimension review ratings, each from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ReviewScore {
    #[serde(rename = "Content Usefulness")]
    pub(crate) content_usefulness: u8,
    #[serde(rename = "Lecture Clarity")]
    pub(crate) lecture_clarity: u8,
    #[serde(rename = "Assignment Difficulty")]
    pub(crate) assignment_difficulty: u8,
    #[serde(rename = "Team Dependency")]
    pub(crate) team_dependency: u8,
    #[serde(rename = "Overall Workload")]
    pub(crate) overall_workload: u8,
}

impl ReviewScore {
    pub(crate) const LABELS: [&'static str; 5] = [
        "Content Usefulness",
        "Lecture Clarity",
        "Assignment Difficulty",
        "Team Dependency",
        "Overall Workload",
    ];

    pub(crate) const MIN: u8 = 1;
    pub(crate) const MAX: u8 = 5;

    pub(crate) fn values(&self) -> [u8; 5] {
        [
            self.content_usefulness,
            self.lecture_clarity,
            self.assignment_difficulty,
            self.team_dependency,
            self.overall_workload,
        ]
    }

    pub(crate) fn value_mut(&mut self, index: usize) -> Option<&mut u8> {
        match index {
            0 => Some(&mut self.content_usefulness),
            1 => Some(&mut self.lecture_clarity),
            2 => Some(&mut self.assignment_difficulty),
            3 => Some(&mut self.team_dependency),
            4 => Some(&mut self.overall_workload),
            _ => None,
        }
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.values()
            .iter()
            .all(|v| (Self::MIN..=Self::MAX).contains(v))
    }
}

impl Default for ReviewScore {
    fn default() -> Self {
        Self {
            content_usefulness: 3,
            lecture_clarity: 3,
            assignment_difficulty: 3,
            team_dependency: 3,
            overall_workload: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Review {
    pub(crate) course_code: String,
    pub(crate) author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) recommended: bool,
    #[serde(default)]
    pub(crate) score: ReviewScore,
}

/// Mean score per review dimension, `None` when there are no reviews.
pub(crate) fn average_scores(reviews: &[Review]) -> Option<[f32; 5]> {
    if reviews.is_empty() {
        return None;
    }

    let mut totals = [0u32; 5];
    for review in reviews {
        for (total, value) in totals.iter_mut().zip(review.score.values()) {
            *total += u32::from(value);
        }
    }

    let count = reviews.len() as f32;
    Some(totals.map(|t| t as f32 / count))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum TrendPeriod {
    ThreeMonths,
    SixMonths,
    Year,
}

impl TrendPeriod {
    pub(crate) const ALL: [TrendPeriod; 3] =
        [TrendPeriod::ThreeMonths, TrendPeriod::SixMonths, TrendPeriod::Year];

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            TrendPeriod::ThreeMonths => "threeMonths",
            TrendPeriod::SixMonths => "sixMonths",
            TrendPeriod::Year => "year",
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self {
            TrendPeriod::ThreeMonths => "Last 3 Months",
            TrendPeriod::SixMonths => "Last 6 Months",
            TrendPeriod::Year => "Last Year",
        }
    }

    pub(crate) fn months(&self) -> u32 {
        match self {
            TrendPeriod::ThreeMonths => 3,
            TrendPeriod::SixMonths => 6,
            TrendPeriod::Year => 12,
        }
    }

    pub(crate) fn next(&self) -> Self {
        match self {
            TrendPeriod::ThreeMonths => TrendPeriod::SixMonths,
            TrendPeriod::SixMonths => TrendPeriod::Year,
            TrendPeriod::Year => TrendPeriod::ThreeMonths,
        }
    }
}

impl Default for TrendPeriod {
    fn default() -> Self {
        TrendPeriod::ThreeMonths
    }
}

impl fmt::Display for TrendPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrendPeriod {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrendPeriod::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

pub(crate) type TrendingCourses = BTreeMap<TrendPeriod, Vec<Course>>;

/// The search domain being queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum SearchCategory {
    Courses,
    Authors,
    Series,
    Lists,
    Characters,
    Users,
}

impl SearchCategory {
    pub(crate) const ALL: [SearchCategory; 6] = [
        SearchCategory::Courses,
        SearchCategory::Authors,
        SearchCategory::Series,
        SearchCategory::Lists,
        SearchCategory::Characters,
        SearchCategory::Users,
    ];

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            SearchCategory::Courses => "courses",
            SearchCategory::Authors => "authors",
            SearchCategory::Series => "series",
            SearchCategory::Lists => "lists",
            SearchCategory::Characters => "characters",
            SearchCategory::Users => "users",
        }
    }

    pub(crate) fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub(crate) fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for SearchCategory {
    fn default() -> Self {
        SearchCategory::Courses
    }
}

impl fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub(crate) struct UnknownVariant(pub(crate) String);

/// Remote data as seen by a view: not requested yet, in flight, or settled.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Remote<T> {
    Idle,
    Loading,
    Ready(T),
    Failed,
}

impl<T> Remote<T> {
    pub(crate) fn ready(&self) -> Option<&T> {
        match self {
            Remote::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }

    /// True when nothing has been requested yet, or the last attempt failed.
    pub(crate) fn needs_fetch(&self) -> bool {
        matches!(self, Remote::Idle | Remote::Failed)
    }
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Remote::Idle
    }
}

impl<T, E> From<Result<T, E>> for Remote<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Remote::Ready(value),
            Err(_) => Remote::Failed,
        }
    }
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Drops `null` entries from a list of strings.
fn present_items<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(items.unwrap_or_default().into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn course_tolerates_nulls_and_missing_fields() {
        let course: Course = serde_json::from_value(json!({
            "code": "MH1811",
            "title": "Mathematics 2",
            "description": null,
            "likes": null,
            "tags": ["calculus", null, "sequences"],
        }))
        .unwrap();

        assert_eq!(course.description, "");
        assert_eq!(course.likes, 0);
        assert_eq!(course.tags, vec!["calculus", "sequences"]);
        assert!(course.school.is_none());
        assert!(course.prerequisites.is_empty());
    }

    #[test]
    fn course_requires_code() {
        let result: Result<Course, _> = serde_json::from_value(json!({ "title": "No code" }));
        assert!(result.is_err());
    }

    #[test]
    fn category_round_trips_through_strings() {
        for category in SearchCategory::ALL {
            assert_eq!(category.as_str().parse::<SearchCategory>(), Ok(category));
        }
        assert!("books".parse::<SearchCategory>().is_err());
    }

    #[test]
    fn category_cycles_in_both_directions() {
        assert_eq!(SearchCategory::Users.next(), SearchCategory::Courses);
        assert_eq!(SearchCategory::Courses.previous(), SearchCategory::Users);
    }

    #[test]
    fn trend_period_uses_camel_case_keys() {
        let value = serde_json::to_value(TrendPeriod::SixMonths).unwrap();
        assert_eq!(value, json!("sixMonths"));
        assert_eq!("year".parse::<TrendPeriod>(), Ok(TrendPeriod::Year));
    }

    #[test]
    fn review_scores_use_labelled_keys() {
        let review: Review = serde_json::from_value(json!({
            "course_code": "SC3004",
            "author": "roland",
            "recommended": true,
            "score": {
                "Content Usefulness": 5,
                "Lecture Clarity": 4,
                "Assignment Difficulty": 2,
                "Team Dependency": 5,
                "Overall Workload": 1,
            }
        }))
        .unwrap();

        assert_eq!(review.score.values(), [5, 4, 2, 5, 1]);
        assert!(review.score.is_valid());
    }

    #[test]
    fn averages_each_dimension() {
        let mut low = ReviewScore::default();
        low.lecture_clarity = 1;
        let mut high = ReviewScore::default();
        high.lecture_clarity = 5;

        let reviews = vec![
            Review {
                course_code: "SC3004".into(),
                author: "a".into(),
                description: String::new(),
                recommended: true,
                score: low,
            },
            Review {
                course_code: "SC3004".into(),
                author: "b".into(),
                description: String::new(),
                recommended: false,
                score: high,
            },
        ];

        let averages = average_scores(&reviews).unwrap();
        assert_eq!(averages[0], 3.0);
        assert_eq!(averages[1], 3.0);
        assert!(average_scores(&[]).is_none());
    }
}
