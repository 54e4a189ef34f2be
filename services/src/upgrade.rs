//! Import of feedback from the legacy assignment module.

use crate::assign::{Context, Grade, LegacyAssignment, LegacySubmission};
use crate::error::{FeedbackError, FeedbackResult};
use crate::feedback_writeup_service::WriteupFeedback;
use crate::lang::get_string_with;
use db::models::feedback_writeup::{CommentFormat, Model};

/// Oldest legacy assignment version whose comments can be imported.
pub const MIN_UPGRADE_VERSION: i64 = 2011112900;

const UPGRADABLE_TYPES: &[&str] = &["upload", "uploadsingle", "online", "offline"];

impl WriteupFeedback {
    pub fn can_upgrade(assignment_type: &str, version: i64) -> bool {
        UPGRADABLE_TYPES.contains(&assignment_type) && version >= MIN_UPGRADE_VERSION
    }

    /// Nothing to carry over: the plugin has no settings.
    pub fn upgrade_settings(
        &self,
        _old_context: Context,
        _old_assignment: &LegacyAssignment,
        _log: &mut String,
    ) -> bool {
        true
    }

    /// Stores the legacy submission comment as the grade's HTML feedback.
    ///
    /// On failure a line is appended to `log` and the error is returned so the
    /// caller can roll back the step for this grade.
    pub async fn upgrade(
        &self,
        _old_context: Context,
        _old_assignment: &LegacyAssignment,
        old_submission: &LegacySubmission,
        grade: &Grade,
        log: &mut String,
    ) -> FeedbackResult<Model> {
        let inserted = Model::create(
            self.db(),
            self.assignment_id(),
            grade.id,
            &old_submission.submission_comment,
            CommentFormat::Html,
        )
        .await;

        inserted.map_err(|source| {
            log.push_str(&get_string_with(self.lang(), "couldnotconvertgrade", grade.user_id));
            log::error!("Legacy writeup import failed for grade {}: {source}", grade.id);
            FeedbackError::Upgrade {
                grade_id: grade.id,
                source,
            }
        })
    }
}
