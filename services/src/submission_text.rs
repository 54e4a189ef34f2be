//! Builds a feedback suggestion from the text of a student's submission.

use crate::assign::Submission;
use crate::form::EditorData;
use async_trait::async_trait;
use db::models::feedback_writeup::CommentFormat;
use once_cell::sync::Lazy;
use regex::Regex;

/// Placeholder the host stores in place of embedded file URLs.
pub const PLUGINFILE_PLACEHOLDER: &str = "@@PLUGINFILE@@";

static PLUGINFILE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<[^<>]+["']@@PLUGINFILE@@[^"']*["'][^<>]*>"#)
        .expect("pluginfile pattern is valid")
});

/// A submission source enabled on the assignment (online text, file upload,
/// ...), as enumerated by the host.
#[async_trait]
pub trait SubmissionPlugin: Send + Sync {
    /// Editor fields as `(name, description)` pairs, in display order.
    fn editor_fields(&self) -> Vec<(String, String)>;

    fn is_enabled(&self) -> bool;

    fn is_visible(&self) -> bool;

    async fn is_empty(&self, submission: &Submission) -> bool;

    async fn get_editor_text(&self, field: &str, submission_id: i64) -> String;

    async fn get_editor_format(&self, field: &str, submission_id: i64) -> CommentFormat;
}

/// Removes every tag that points at an embedded submission file.
pub fn strip_pluginfile_content(source: &str) -> String {
    if !source.contains(PLUGINFILE_PLACEHOLDER) {
        return source.to_string();
    }
    PLUGINFILE_TAG.replace_all(source, "").into_owned()
}

/// Concatenates the editor text of every enabled, visible, non-empty source.
///
/// The first field's format is adopted; if any later field disagrees the
/// whole result falls back to plain text. With no fields at all the result is
/// empty markup.
pub async fn convert_submission_text(
    plugins: &[Box<dyn SubmissionPlugin>],
    submission: &Submission,
) -> EditorData {
    let mut format: Option<CommentFormat> = None;
    let mut text = String::new();

    for plugin in plugins {
        let fields = plugin.editor_fields();
        if fields.is_empty() || !plugin.is_enabled() || !plugin.is_visible() {
            continue;
        }
        if plugin.is_empty(submission).await {
            continue;
        }

        for (name, _description) in &fields {
            let raw = plugin.get_editor_text(name, submission.id).await;
            let field_format = plugin.get_editor_format(name, submission.id).await;

            format = match format {
                Some(current) if current != field_format => Some(CommentFormat::Plain),
                _ => Some(field_format),
            };
            text.push_str(&strip_pluginfile_content(&raw));
        }
    }

    EditorData {
        text,
        format: format.unwrap_or(CommentFormat::Markup),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Submission source with fixed field contents.
    pub struct StaticSource {
        pub enabled: bool,
        pub visible: bool,
        pub empty: bool,
        pub fields: Vec<(&'static str, &'static str, CommentFormat)>,
    }

    impl StaticSource {
        pub fn online_text(text: &'static str, format: CommentFormat) -> Self {
            Self {
                enabled: true,
                visible: true,
                empty: text.is_empty(),
                fields: vec![("onlinetext", text, format)],
            }
        }

        fn field(&self, name: &str) -> Option<&(&'static str, &'static str, CommentFormat)> {
            self.fields.iter().find(|(n, _, _)| *n == name)
        }
    }

    #[async_trait]
    impl SubmissionPlugin for StaticSource {
        fn editor_fields(&self) -> Vec<(String, String)> {
            self.fields
                .iter()
                .map(|(name, _, _)| (name.to_string(), format!("{name} field")))
                .collect()
        }

        fn is_enabled(&self) -> bool {
            self.enabled
        }

        fn is_visible(&self) -> bool {
            self.visible
        }

        async fn is_empty(&self, _submission: &Submission) -> bool {
            self.empty
        }

        async fn get_editor_text(&self, field: &str, _submission_id: i64) -> String {
            self.field(field).map(|f| f.1.to_string()).unwrap_or_default()
        }

        async fn get_editor_format(&self, field: &str, _submission_id: i64) -> CommentFormat {
            self.field(field).map(|f| f.2).unwrap_or_default()
        }
    }

    fn submission() -> Submission {
        Submission {
            id: 3,
            assignment_id: 1,
            user_id: 2,
        }
    }

    fn boxed(sources: Vec<StaticSource>) -> Vec<Box<dyn SubmissionPlugin>> {
        sources
            .into_iter()
            .map(|s| Box::new(s) as Box<dyn SubmissionPlugin>)
            .collect()
    }

    #[tokio::test]
    async fn test_mixed_formats_fall_back_to_plain() {
        let plugins = boxed(vec![
            StaticSource::online_text("<p>one</p>", CommentFormat::Html),
            StaticSource::online_text("two", CommentFormat::Plain),
        ]);

        let data = convert_submission_text(&plugins, &submission()).await;
        assert_eq!(data.text, "<p>one</p>two");
        assert_eq!(data.format, CommentFormat::Plain);
    }

    #[tokio::test]
    async fn test_matching_formats_are_kept() {
        let plugins = boxed(vec![
            StaticSource::online_text("<p>one</p>", CommentFormat::Html),
            StaticSource::online_text("<p>two</p>", CommentFormat::Html),
        ]);

        let data = convert_submission_text(&plugins, &submission()).await;
        assert_eq!(data.text, "<p>one</p><p>two</p>");
        assert_eq!(data.format, CommentFormat::Html);
    }

    #[tokio::test]
    async fn test_no_fields_default_to_markup() {
        let data = convert_submission_text(&[], &submission()).await;
        assert_eq!(data, EditorData::new("", CommentFormat::Markup));

        let hidden = StaticSource {
            visible: false,
            ..StaticSource::online_text("secret", CommentFormat::Html)
        };
        let disabled = StaticSource {
            enabled: false,
            ..StaticSource::online_text("off", CommentFormat::Html)
        };
        let empty = StaticSource::online_text("", CommentFormat::Html);
        let plugins = boxed(vec![hidden, disabled, empty]);

        let data = convert_submission_text(&plugins, &submission()).await;
        assert_eq!(data, EditorData::new("", CommentFormat::Markup));
    }

    #[tokio::test]
    async fn test_fields_are_merged_in_order() {
        let source = StaticSource {
            enabled: true,
            visible: true,
            empty: false,
            fields: vec![
                ("intro", "A", CommentFormat::Markup),
                ("body", "B", CommentFormat::Markup),
            ],
        };
        let plugins = boxed(vec![source, StaticSource::online_text("C", CommentFormat::Markup)]);

        let data = convert_submission_text(&plugins, &submission()).await;
        assert_eq!(data.text, "ABC");
        assert_eq!(data.format, CommentFormat::Markup);
    }

    #[test]
    fn test_strip_pluginfile_content() {
        let source = r#"<p>See <img src="@@PLUGINFILE@@/diagram.png" alt="d"> here</p>"#;
        assert_eq!(strip_pluginfile_content(source), "<p>See  here</p>");

        let untouched = r#"<p><img src="https://example.com/a.png"></p>"#;
        assert_eq!(strip_pluginfile_content(untouched), untouched);
    }
}
