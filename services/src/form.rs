//! Form element descriptors handed to the grading page.

use crate::format::escape_html;
use db::models::feedback_writeup::CommentFormat;
use serde::{Deserialize, Serialize};

/// Name of the rich-text editor field on the grading form.
pub const EDITOR_FIELD: &str = "assignfeedbackwriteup_editor";

/// Toolbar layout requested for the feedback editor.
pub const EDITOR_TOOLBAR: &str = "collapse = collapse\nstyle1 = writeup,html";

/// Field name of the quick grading textarea for `user_id`.
pub fn quickgrade_field_name(user_id: i64) -> String {
    format!("quickgrade_writeup_{user_id}")
}

/// Text and format pair submitted by (or pre-filled into) the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorData {
    pub text: String,
    pub format: CommentFormat,
}

impl EditorData {
    pub fn new(text: impl Into<String>, format: CommentFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }
}

/// The feedback editor as it should appear on the grading form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorElement {
    pub name: String,
    pub label: String,
    pub toolbar: String,
    pub autosave: bool,
    pub value: EditorData,
}

impl EditorElement {
    pub fn new(label: impl Into<String>, value: EditorData) -> Self {
        Self {
            name: EDITOR_FIELD.to_string(),
            label: label.into(),
            toolbar: EDITOR_TOOLBAR.to_string(),
            autosave: true,
            value,
        }
    }
}

/// One row's textarea in the quick grading table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickGradeElement {
    pub name: String,
    pub label: String,
    pub text: String,
}

impl QuickGradeElement {
    pub fn new(user_id: i64, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: quickgrade_field_name(user_id),
            label: label.into(),
            text: text.into(),
        }
    }

    pub fn to_html(&self) -> String {
        let name = &self.name;
        format!(
            "<label for=\"{name}\" class=\"accesshide\">{}</label>\
             <textarea name=\"{name}\" id=\"{name}\" class=\"quickgrade\">{}</textarea>",
            escape_html(&self.label),
            escape_html(&self.text),
        )
    }
}

/// A settings-form rule: `element` is disabled while `depends_on` is unchecked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledIf {
    pub element: String,
    pub depends_on: String,
    pub condition: String,
}

/// Kind of value accepted by an external (web service) parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Raw,
    Int,
}

/// Description of one field the web service layer may send for this plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExternalParameter {
    Value {
        param_type: ParamType,
        description: String,
    },
    Structure {
        description: String,
        optional: bool,
        fields: Vec<(String, ExternalParameter)>,
    },
}
