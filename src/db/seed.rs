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

//! Demo catalog for offline use.

use rusqlite::{Connection, Result};

use crate::model::{Course, CourseList};

struct Seed {
    code: &'static str,
    title: &'static str,
    school: &'static str,
    description: &'static str,
    tags: &'static [&'static str],
    prerequisites: &'static [&'static str],
    color: &'static str,
}

const SPMS: &str = "SPMS";
const CCDS: &str = "CCDS";

const COURSES: &[Seed] = &[
    Seed {
        code: "MH1810",
        title: "Mathematics 1",
        school: SPMS,
        description: "Limits, differentiation and integration of functions of one variable.",
        tags: &["calculus", "core"],
        prerequisites: &[],
        color: "#4f7cac",
    },
    Seed {
        code: "MH1811",
        title: "Mathematics 2",
        school: SPMS,
        description: "Sequences and series, multivariable calculus and linear algebra.",
        tags: &["calculus", "sequences", "linear algebra"],
        prerequisites: &["MH1810"],
        color: "#5c8a6e",
    },
    Seed {
        code: "MH1812",
        title: "Discrete Mathematics",
        school: SPMS,
        description: "Logic, sets, relations, counting, recurrences and graphs.",
        tags: &["discrete", "sequences", "core"],
        prerequisites: &[],
        color: "#a0617a",
    },
    Seed {
        code: "MH2100",
        title: "Calculus III",
        school: SPMS,
        description: "Vector calculus, line and surface integrals.",
        tags: &["calculus"],
        prerequisites: &["MH1811"],
        color: "#7a6fa0",
    },
    Seed {
        code: "MH2500",
        title: "Probability and Introduction to Statistics",
        school: SPMS,
        description: "Random variables, distributions, estimation and hypothesis testing.",
        tags: &["statistics", "core"],
        prerequisites: &["MH1810"],
        color: "#b08a3e",
    },
    Seed {
        code: "PH1012",
        title: "Physics A",
        school: SPMS,
        description: "Mechanics, oscillations and waves.",
        tags: &["physics", "core"],
        prerequisites: &[],
        color: "#3e8fb0",
    },
    Seed {
        code: "SC1003",
        title: "Introduction to Computational Thinking and Programming",
        school: CCDS,
        description: "Problem solving with Python: decomposition, abstraction and algorithms.",
        tags: &["programming", "core"],
        prerequisites: &[],
        color: "#c0653e",
    },
    Seed {
        code: "SC1007",
        title: "Data Structures and Algorithms",
        school: CCDS,
        description: "Linked lists, stacks, queues, trees, hashing and searching.",
        tags: &["algorithms", "programming"],
        prerequisites: &["SC1003"],
        color: "#6e8f3e",
    },
    Seed {
        code: "SC2001",
        title: "Algorithm Design and Analysis",
        school: CCDS,
        description: "Complexity, divide and conquer, dynamic programming and graph algorithms.",
        tags: &["algorithms"],
        prerequisites: &["SC1007", "MH1812"],
        color: "#8f3e6e",
    },
    Seed {
        code: "SC2002",
        title: "Object Oriented Design and Programming",
        school: CCDS,
        description: "Classes, inheritance, polymorphism and design principles in Java.",
        tags: &["programming", "design"],
        prerequisites: &["SC1003"],
        color: "#3e6e8f",
    },
    Seed {
        code: "SC2005",
        title: "Operating Systems",
        school: CCDS,
        description: "Processes, threads, scheduling, memory management and file systems.",
        tags: &["systems"],
        prerequisites: &["SC1007"],
        color: "#5a5a8f",
    },
    Seed {
        code: "SC3004",
        title: "Software Engineering",
        school: CCDS,
        description: "Requirements, architecture, testing and team software projects.",
        tags: &["design", "projects"],
        prerequisites: &["SC2002"],
        color: "#8f5a3e",
    },
    Seed {
        code: "SC4001",
        title: "Neural Networks and Deep Learning",
        school: CCDS,
        description: "Perceptrons, backpropagation, convolutional and recurrent networks.",
        tags: &["machine learning", "statistics"],
        prerequisites: &["MH2500", "SC1007"],
        color: "#3e8f7a",
    },
];

const LISTS: &[(&str, &str, &str, &str)] = &[
    (
        "spms",
        "Physical & Mathematical Sciences",
        "Foundations in mathematics and physics.",
        SPMS,
    ),
    (
        "ccds",
        "Computing & Data Science",
        "Programming, systems and algorithms.",
        CCDS,
    ),
];

fn course(seed: &Seed) -> Course {
    Course {
        code: seed.code.to_string(),
        title: seed.title.to_string(),
        school: Some(seed.school.to_string()),
        description: seed.description.to_string(),
        likes: 0,
        watchlists: 0,
        tags: seed.tags.iter().map(|t| t.to_string()).collect(),
        prerequisites: seed.prerequisites.iter().map(|p| p.to_string()).collect(),
        color: Some(seed.color.to_string()),
    }
}

/// Populates an empty database with the demo catalog.
///
/// Returns the number of courses inserted, zero when the database already
/// holds courses.
pub(crate) fn seed_demo_catalog(conn: &mut Connection) -> Result<usize> {
    if super::course_count(conn)? > 0 {
        return Ok(0);
    }

    let tx = conn.transaction()?;

    let courses: Vec<Course> = COURSES.iter().map(course).collect();
    for course in &courses {
        super::upsert_course(&tx, course)?;
    }

    for (slug, name, description, school) in LISTS {
        let list = CourseList {
            key: slug.to_string(),
            slug: slug.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            courses: courses
                .iter()
                .filter(|c| c.school.as_deref() == Some(*school))
                .cloned()
                .collect(),
        };
        super::insert_course_list(&tx, &list)?;
    }

    tx.commit()?;

    tracing::info!(courses = courses.len(), lists = LISTS.len(), "seeded demo catalog");

    Ok(courses.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{fetch_all_courses, fetch_course_lists, init_memory_db};

    #[test]
    fn seeds_once() {
        let mut conn = init_memory_db().unwrap();

        assert_eq!(seed_demo_catalog(&mut conn).unwrap(), COURSES.len());
        assert_eq!(seed_demo_catalog(&mut conn).unwrap(), 0);
        assert_eq!(fetch_all_courses(&conn).unwrap().len(), COURSES.len());
    }

    #[test]
    fn every_school_has_a_list() {
        let mut conn = init_memory_db().unwrap();
        seed_demo_catalog(&mut conn).unwrap();

        let lists = fetch_course_lists(&conn).unwrap();
        assert_eq!(lists.len(), 2);
        assert!(lists.iter().all(|l| !l.courses.is_empty()));
    }

    #[test]
    fn prerequisites_refer_to_catalog_courses() {
        for seed in COURSES {
            for prerequisite in seed.prerequisites {
                assert!(COURSES.iter().any(|c| c.code == *prerequisite));
            }
        }
    }
}
