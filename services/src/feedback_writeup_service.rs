//! Lifecycle of the single writeup comment stored per grade.

use crate::assign::{Context, Grade, Submission};
use crate::error::FeedbackResult;
use crate::form::{
    quickgrade_field_name, DisabledIf, EditorData, EditorElement, ExternalParameter, ParamType,
    QuickGradeElement, EDITOR_FIELD,
};
use crate::format::{HtmlFormatter, TextFormatter, SUMMARY_LENGTH};
use crate::input::{NoInput, RawInput};
use crate::lang::get_string;
use crate::plugin::FeedbackPlugin;
use crate::submission_text::{convert_submission_text, SubmissionPlugin};
use async_trait::async_trait;
use db::models::feedback_writeup::{CommentFormat, Model};
use sea_orm::DatabaseConnection;

pub const PLUGIN_TYPE: &str = "writeup";

/// Name of the one text field this plugin exposes for import/export.
pub const WRITEUP_FIELD: &str = "writeup";

/// Writeup feedback bound to one assignment instance.
///
/// Storage, rendering and the raw request parameters are all injected; a new
/// value is expected per request.
pub struct WriteupFeedback {
    db: DatabaseConnection,
    assignment_id: i64,
    context: Context,
    lang: String,
    formatter: Box<dyn TextFormatter>,
    input: Box<dyn RawInput>,
}

impl WriteupFeedback {
    /// `lang` selects the string table used for labels and log lines.
    pub fn new(
        db: DatabaseConnection,
        assignment_id: i64,
        context: Context,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            db,
            assignment_id,
            context,
            lang: lang.into(),
            formatter: Box::new(HtmlFormatter),
            input: Box::new(NoInput),
        }
    }

    pub fn with_formatter(mut self, formatter: impl TextFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn with_input(mut self, input: impl RawInput + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    pub fn assignment_id(&self) -> i64 {
        self.assignment_id
    }

    pub fn context(&self) -> Context {
        self.context
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn fetch(&self, grade_id: i64) -> FeedbackResult<Option<Model>> {
        Ok(Model::find_by_grade(&self.db, grade_id).await?)
    }

    /// Updates the grade's comment in place, or inserts it under
    /// `assignment_id` when the grade has none yet.
    pub async fn save(
        &self,
        grade_id: i64,
        assignment_id: i64,
        text: &str,
        format: CommentFormat,
    ) -> FeedbackResult<Model> {
        let saved = match self.fetch(grade_id).await? {
            Some(existing) => existing.set_comment(&self.db, text, format).await,
            None => Model::create(&self.db, assignment_id, grade_id, text, format).await,
        };

        saved.map_err(|err| {
            log::warn!("Failed to save writeup for grade {grade_id}: {err}");
            err.into()
        })
    }

    /// Saves a value from the quick grading table.
    ///
    /// `None` means the column was not on the submitted form, so nothing is
    /// stored. Any present value, even empty, replaces the comment.
    pub async fn save_quickgrade(
        &self,
        user_id: i64,
        grade_id: i64,
        assignment_id: i64,
        raw_text: Option<&str>,
    ) -> FeedbackResult<()> {
        let Some(text) = raw_text else {
            log::debug!("No quick grading value for user {user_id}, leaving grade {grade_id} untouched");
            return Ok(());
        };

        self.save(grade_id, assignment_id, text, CommentFormat::Markup)
            .await?;
        Ok(())
    }

    pub async fn is_quickgrade_modified(&self, user_id: i64, grade_id: Option<i64>) -> FeedbackResult<bool> {
        let Some(new_value) = self.input.raw_param(&quickgrade_field_name(user_id)) else {
            return Ok(false);
        };
        let stored = self.stored_text(grade_id).await?;
        Ok(new_value != stored)
    }

    /// Only the text is compared; a format-only change does not count.
    pub async fn is_feedback_modified(&self, grade_id: i64, submitted_text: &str) -> FeedbackResult<bool> {
        let stored = self.stored_text(Some(grade_id)).await?;
        Ok(stored != submitted_text)
    }

    pub async fn delete_for_assignment(&self, assignment_id: i64) -> FeedbackResult<u64> {
        let removed = Model::delete_for_assignment(&self.db, assignment_id).await?;
        log::info!("Removed {removed} writeup(s) for assignment {assignment_id}");
        Ok(removed)
    }

    pub async fn is_empty(&self, grade_id: i64) -> FeedbackResult<bool> {
        Ok(self.view_for_grade(grade_id).await?.is_empty())
    }

    pub fn render_full(&self, record: &Model) -> String {
        self.formatter
            .format(&record.comment_text, record.comment_format, self.context)
    }

    pub fn render_summary(&self, record: &Model) -> (String, bool) {
        let text = self.render_full(record);
        self.formatter.shorten(&text, SUMMARY_LENGTH)
    }

    pub async fn view_for_grade(&self, grade_id: i64) -> FeedbackResult<String> {
        Ok(self
            .fetch(grade_id)
            .await?
            .map(|record| self.render_full(&record))
            .unwrap_or_default())
    }

    pub async fn view_summary_for_grade(&self, grade_id: i64) -> FeedbackResult<(String, bool)> {
        Ok(self
            .fetch(grade_id)
            .await?
            .map(|record| self.render_summary(&record))
            .unwrap_or_default())
    }

    async fn stored_text(&self, grade_id: Option<i64>) -> FeedbackResult<String> {
        let Some(grade_id) = grade_id else {
            return Ok(String::new());
        };
        Ok(self
            .fetch(grade_id)
            .await?
            .map(|record| record.comment_text)
            .unwrap_or_default())
    }

    pub fn editor_fields(&self) -> Vec<(String, String)> {
        vec![(WRITEUP_FIELD.to_string(), self.name())]
    }

    pub async fn get_editor_text(&self, name: &str, grade_id: i64) -> FeedbackResult<String> {
        if name != WRITEUP_FIELD {
            return Ok(String::new());
        }
        self.stored_text(Some(grade_id)).await
    }

    /// Imports text into the writeup field. Returns `false` for any other
    /// field name.
    pub async fn set_editor_text(
        &self,
        name: &str,
        value: &str,
        grade_id: i64,
        assignment_id: i64,
    ) -> FeedbackResult<bool> {
        if name != WRITEUP_FIELD {
            return Ok(false);
        }

        match self.fetch(grade_id).await? {
            Some(existing) => {
                let format = existing.comment_format;
                existing.set_comment(&self.db, value, format).await?;
            }
            None => {
                Model::create(&self.db, assignment_id, grade_id, value, CommentFormat::Html).await?;
            }
        }
        Ok(true)
    }

    /// The plugin has no settings of its own; it only follows online text
    /// submissions being enabled.
    pub fn settings(&self) -> Vec<DisabledIf> {
        vec![DisabledIf {
            element: format!("assignfeedback_{PLUGIN_TYPE}_enabled"),
            depends_on: "assignsubmission_onlinetext_enabled".to_string(),
            condition: "notchecked".to_string(),
        }]
    }

    pub fn save_settings(&self) -> bool {
        true
    }

    pub fn external_parameters(&self) -> Vec<(String, ExternalParameter)> {
        let fields = vec![
            (
                "text".to_string(),
                ExternalParameter::Value {
                    param_type: ParamType::Raw,
                    description: "The text for this feedback.".to_string(),
                },
            ),
            (
                "format".to_string(),
                ExternalParameter::Value {
                    param_type: ParamType::Int,
                    description: "The format for this feedback".to_string(),
                },
            ),
        ];

        vec![(
            EDITOR_FIELD.to_string(),
            ExternalParameter::Structure {
                description: "Editor structure".to_string(),
                optional: true,
                fields,
            },
        )]
    }
}

#[async_trait]
impl FeedbackPlugin for WriteupFeedback {
    fn plugin_type(&self) -> &'static str {
        PLUGIN_TYPE
    }

    fn name(&self) -> String {
        get_string(&self.lang, "pluginname")
    }

    fn supports_quickgrading(&self) -> bool {
        true
    }

    async fn quickgrading_element(
        &self,
        user_id: i64,
        grade: Option<&Grade>,
    ) -> FeedbackResult<Option<QuickGradeElement>> {
        let text = self.stored_text(grade.map(|g| g.id)).await?;
        Ok(Some(QuickGradeElement::new(user_id, self.name(), text)))
    }

    async fn is_quickgrading_modified(&self, user_id: i64, grade: Option<&Grade>) -> FeedbackResult<bool> {
        self.is_quickgrade_modified(user_id, grade.map(|g| g.id)).await
    }

    async fn save_quickgrading_changes(&self, user_id: i64, grade: &Grade) -> FeedbackResult<()> {
        let raw = self.input.raw_param(&quickgrade_field_name(user_id));
        self.save_quickgrade(user_id, grade.id, self.assignment_id, raw)
            .await
    }

    async fn form_elements_for_user(
        &self,
        grade: Option<&Grade>,
        submission: Option<&Submission>,
        submission_plugins: &[Box<dyn SubmissionPlugin>],
    ) -> FeedbackResult<EditorElement> {
        let existing = match grade {
            Some(grade) => self.fetch(grade.id).await?,
            None => None,
        };

        let value = match (existing, submission) {
            (Some(record), _) if !record.comment_text.is_empty() => {
                EditorData::new(record.comment_text, record.comment_format)
            }
            (_, Some(submission)) => convert_submission_text(submission_plugins, submission).await,
            _ => EditorData::default(),
        };

        Ok(EditorElement::new(self.name(), value))
    }

    async fn is_form_modified(&self, grade: &Grade, data: &EditorData) -> FeedbackResult<bool> {
        self.is_feedback_modified(grade.id, &data.text).await
    }

    async fn save_form(&self, grade: &Grade, data: &EditorData) -> FeedbackResult<()> {
        self.save(grade.id, self.assignment_id, &data.text, data.format)
            .await?;
        Ok(())
    }

    async fn view_summary(&self, grade: &Grade) -> FeedbackResult<(String, bool)> {
        self.view_summary_for_grade(grade.id).await
    }

    async fn view(&self, grade: &Grade) -> FeedbackResult<String> {
        self.view_for_grade(grade.id).await
    }

    async fn is_empty(&self, grade: &Grade) -> FeedbackResult<bool> {
        WriteupFeedback::is_empty(self, grade.id).await
    }

    async fn text_for_gradebook(&self, grade: &Grade) -> FeedbackResult<String> {
        self.stored_text(Some(grade.id)).await
    }

    async fn format_for_gradebook(&self, grade: &Grade) -> FeedbackResult<CommentFormat> {
        Ok(self
            .fetch(grade.id)
            .await?
            .map(|record| record.comment_format)
            .unwrap_or(CommentFormat::Markup))
    }

    async fn delete_instance(&self) -> FeedbackResult<()> {
        self.delete_for_assignment(self.assignment_id).await?;
        Ok(())
    }
}
