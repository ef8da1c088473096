//! Entity records persisted by the crate.

use serde::{Deserialize, Serialize};

/// Integer primary key. `0` marks a record that has not been persisted yet.
pub type Id = i64;

/// A course row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Id,
    pub name: String,
    pub url: Option<String>,
}

impl Course {
    /// Create a transient course (identity `0`)
    pub fn new(name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            url,
        }
    }

    /// Copy of this course carrying the given identity
    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

/// A review row. `course_id` references [`Course::id`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Id,
    pub course_id: Id,
    pub rating: i32,
    pub comment: String,
}

impl Review {
    /// Create a transient review (identity `0`)
    pub fn new(course_id: Id, rating: i32, comment: impl Into<String>) -> Self {
        Self {
            id: 0,
            course_id,
            rating,
            comment: comment.into(),
        }
    }

    /// Copy of this review carrying the given identity
    pub fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
