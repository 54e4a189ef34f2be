//! Records handed to the plugin by the assignment module. The plugin never
//! creates or persists these itself.

use serde::{Deserialize, Serialize};

/// Scoping handle for where a piece of content lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Context {
    pub id: i64,
}

impl Context {
    pub fn new(id: i64) -> Self {
        Self { id }
    }
}

/// A student's grade for one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub assignment_id: i64,
    pub user_id: i64,
}

/// A student's submission for one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub user_id: i64,
}

/// Assignment row from the pre-2.3 assignment module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAssignment {
    pub id: i64,
    /// `upload`, `uploadsingle`, `online` or `offline`.
    pub assignment_type: String,
    pub version: i64,
}

/// Submission row from the pre-2.3 assignment module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySubmission {
    pub id: i64,
    pub user_id: i64,
    pub submission_comment: String,
}
