use crate::assign::{Grade, Submission};
use crate::error::FeedbackResult;
use crate::form::{EditorData, EditorElement, QuickGradeElement};
use crate::submission_text::SubmissionPlugin;
use async_trait::async_trait;
use db::models::feedback_writeup::CommentFormat;

/// Hooks the assignment module calls on every enabled feedback plugin.
#[async_trait]
pub trait FeedbackPlugin: Send + Sync {
    /// Short type name, unique among feedback plugins.
    fn plugin_type(&self) -> &'static str;

    /// Localised display name.
    fn name(&self) -> String;

    fn supports_quickgrading(&self) -> bool {
        false
    }

    async fn quickgrading_element(
        &self,
        user_id: i64,
        grade: Option<&Grade>,
    ) -> FeedbackResult<Option<QuickGradeElement>> {
        let _ = (user_id, grade);
        Ok(None)
    }

    async fn is_quickgrading_modified(&self, user_id: i64, grade: Option<&Grade>) -> FeedbackResult<bool> {
        let _ = (user_id, grade);
        Ok(false)
    }

    async fn save_quickgrading_changes(&self, user_id: i64, grade: &Grade) -> FeedbackResult<()> {
        let _ = (user_id, grade);
        Ok(())
    }

    async fn form_elements_for_user(
        &self,
        grade: Option<&Grade>,
        submission: Option<&Submission>,
        submission_plugins: &[Box<dyn SubmissionPlugin>],
    ) -> FeedbackResult<EditorElement>;

    async fn is_form_modified(&self, grade: &Grade, data: &EditorData) -> FeedbackResult<bool>;

    async fn save_form(&self, grade: &Grade, data: &EditorData) -> FeedbackResult<()>;

    /// Short rendering for the grading table, plus whether it was cut.
    async fn view_summary(&self, grade: &Grade) -> FeedbackResult<(String, bool)>;

    async fn view(&self, grade: &Grade) -> FeedbackResult<String>;

    async fn is_empty(&self, grade: &Grade) -> FeedbackResult<bool>;

    async fn text_for_gradebook(&self, grade: &Grade) -> FeedbackResult<String>;

    async fn format_for_gradebook(&self, grade: &Grade) -> FeedbackResult<CommentFormat>;

    /// Called when the owning assignment is deleted.
    async fn delete_instance(&self) -> FeedbackResult<()>;
}
