//! Export and erasure of writeup feedback for privacy requests.
//!
//! Requests arrive fully resolved: the privacy framework has already worked
//! out which assignment, grades and users are targeted.

use crate::assign::Context;
use crate::error::FeedbackResult;
use crate::lang::get_string;
use db::models::feedback_writeup::Model;
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Subcontext label feedback is exported under.
pub const EXPORT_PATH: &str = "Feedback writeup";

/// Identifiers for one export or deletion, as computed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginRequestData {
    pub context: Context,
    pub assignment_id: i64,
    pub grade_id: Option<i64>,
    pub user_id: Option<i64>,
    /// Path the export is nested under.
    pub subcontext: Vec<String>,
    /// Grades targeted by a multi-user deletion.
    pub grade_ids: Vec<i64>,
}

impl PluginRequestData {
    pub fn new(context: Context, assignment_id: i64) -> Self {
        Self {
            context,
            assignment_id,
            grade_id: None,
            user_id: None,
            subcontext: Vec::new(),
            grade_ids: Vec::new(),
        }
    }

    pub fn for_grade(mut self, grade_id: i64, user_id: i64) -> Self {
        self.grade_id = Some(grade_id);
        self.user_id = Some(user_id);
        self
    }

    pub fn with_subcontext(mut self, subcontext: Vec<String>) -> Self {
        self.subcontext = subcontext;
        self
    }

    pub fn with_grade_ids(mut self, grade_ids: Vec<i64>) -> Self {
        self.grade_ids = grade_ids;
        self
    }
}

/// Exported data, keyed by context and then by subcontext path.
#[derive(Debug, Clone, Default)]
pub struct ExportTree {
    contexts: BTreeMap<Context, BTreeMap<Vec<String>, Value>>,
}

impl ExportTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `data` at `path` within `context`, replacing anything already
    /// there.
    pub fn export_data<T: Serialize>(
        &mut self,
        context: Context,
        path: Vec<String>,
        data: &T,
    ) -> FeedbackResult<()> {
        let value = serde_json::to_value(data)?;
        self.contexts.entry(context).or_default().insert(path, value);
        Ok(())
    }

    pub fn get_data(&self, context: Context, path: &[&str]) -> Option<&Value> {
        let key: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        self.contexts.get(&context).and_then(|entries| entries.get(&key))
    }

    pub fn has_any_data(&self, context: Context) -> bool {
        self.contexts
            .get(&context)
            .is_some_and(|entries| !entries.is_empty())
    }

    pub fn entry_count(&self, context: Context) -> usize {
        self.contexts.get(&context).map_or(0, BTreeMap::len)
    }
}

#[derive(Debug, Serialize)]
struct ExportedComment<'a> {
    commenttext: &'a str,
}

/// A stored field and why it is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataField {
    pub name: &'static str,
    pub purpose: String,
}

/// What this plugin stores about users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub table: &'static str,
    pub summary: String,
    pub fields: Vec<MetadataField>,
}

pub fn metadata(lang: &str) -> Metadata {
    Metadata {
        table: "assignfeedback_writeup",
        summary: get_string(lang, "privacy:metadata:tablesummary"),
        fields: vec![
            MetadataField {
                name: "assignment",
                purpose: get_string(lang, "privacy:metadata:assignmentid"),
            },
            MetadataField {
                name: "grade",
                purpose: get_string(lang, "privacy:metadata:gradepurpose"),
            },
            MetadataField {
                name: "commenttext",
                purpose: get_string(lang, "privacy:metadata:commentpurpose"),
            },
        ],
    }
}

/// Writes the feedback for the request's grade into `writer`. Does nothing
/// when the request has no grade or the grade has no feedback.
pub async fn export_feedback_user_data<C>(
    db: &C,
    request: &PluginRequestData,
    writer: &mut ExportTree,
) -> FeedbackResult<bool>
where
    C: ConnectionTrait,
{
    let Some(grade_id) = request.grade_id else {
        return Ok(false);
    };
    let Some(record) = Model::find_by_grade(db, grade_id).await? else {
        return Ok(false);
    };

    let mut path = request.subcontext.clone();
    path.push(EXPORT_PATH.to_string());

    writer.export_data(
        request.context,
        path,
        &ExportedComment {
            commenttext: &record.comment_text,
        },
    )?;
    log::debug!(
        "Exported writeup for grade {grade_id} in context {}",
        request.context.id
    );
    Ok(true)
}

/// Removes all feedback for the request's assignment.
pub async fn delete_feedback_for_context<C>(db: &C, request: &PluginRequestData) -> FeedbackResult<u64>
where
    C: ConnectionTrait,
{
    let removed = Model::delete_for_assignment(db, request.assignment_id).await?;
    log::info!(
        "Privacy erasure removed {removed} writeup(s) for assignment {}",
        request.assignment_id
    );
    Ok(removed)
}

/// Removes the feedback for the request's grade, if any.
pub async fn delete_feedback_for_grade<C>(db: &C, request: &PluginRequestData) -> FeedbackResult<u64>
where
    C: ConnectionTrait,
{
    let Some(grade_id) = request.grade_id else {
        return Ok(0);
    };
    Ok(Model::delete_for_grade(db, grade_id).await?)
}

/// Removes the feedback for every grade listed in the request.
pub async fn delete_feedback_for_grades<C>(db: &C, request: &PluginRequestData) -> FeedbackResult<u64>
where
    C: ConnectionTrait,
{
    let removed = Model::delete_for_grades(db, &request.grade_ids).await?;
    log::info!(
        "Privacy erasure removed {removed} of {} requested writeup(s)",
        request.grade_ids.len()
    );
    Ok(removed)
}
