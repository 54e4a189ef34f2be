//! Privacy export and erasure across several assignments and students.

use crate::assign::{Context, Grade};
use crate::form::EditorData;
use crate::plugin::FeedbackPlugin;
use crate::privacy::{
    delete_feedback_for_context, delete_feedback_for_grade, delete_feedback_for_grades,
    export_feedback_user_data, ExportTree, PluginRequestData, EXPORT_PATH,
};
use crate::WriteupFeedback;
use db::models::feedback_writeup::CommentFormat;
use db::test_utils::setup_test_db;
use sea_orm::DatabaseConnection;

const STUDENT_1: i64 = 101;
const STUDENT_2: i64 = 102;
const STUDENT_3: i64 = 103;
const STUDENT_4: i64 = 104;
const TEACHER: i64 = 200;

fn assignment(db: &DatabaseConnection, id: i64) -> WriteupFeedback {
    WriteupFeedback::new(db.clone(), id, Context::new(id * 10), "en")
}

/// Saves feedback through the grading form and returns the grade it hangs off.
async fn create_feedback(plugin: &WriteupFeedback, grade_id: i64, student: i64, text: &str) -> Grade {
    let grade = Grade {
        id: grade_id,
        assignment_id: plugin.assignment_id(),
        user_id: student,
    };
    plugin
        .save_form(&grade, &EditorData::new(text, CommentFormat::Html))
        .await
        .expect("Failed to save feedback");
    grade
}

#[tokio::test]
async fn test_export_feedback_user_data() {
    let db = setup_test_db().await;
    let plugin = assignment(&db, 1);
    let context = plugin.context();

    let feedback_text = "<p>first comment for this test</p>";
    let grade = create_feedback(&plugin, 1, STUDENT_1, feedback_text).await;

    let mut writer = ExportTree::new();
    assert!(!writer.has_any_data(context));

    // The student sees the teacher's feedback.
    let request = PluginRequestData::new(context, 1).for_grade(grade.id, STUDENT_1);
    assert!(export_feedback_user_data(&db, &request, &mut writer).await.unwrap());
    assert_eq!(
        writer.get_data(context, &[EXPORT_PATH]).unwrap()["commenttext"],
        feedback_text
    );

    // So does the teacher who wrote it.
    let request = PluginRequestData::new(context, 1).for_grade(grade.id, TEACHER);
    assert!(export_feedback_user_data(&db, &request, &mut writer).await.unwrap());
    assert_eq!(
        writer.get_data(context, &[EXPORT_PATH]).unwrap()["commenttext"],
        feedback_text
    );
    assert_eq!(writer.entry_count(context), 1);
}

#[tokio::test]
async fn test_export_without_feedback_writes_nothing() {
    let db = setup_test_db().await;
    let plugin = assignment(&db, 1);
    let context = plugin.context();

    let mut writer = ExportTree::new();
    let request = PluginRequestData::new(context, 1).for_grade(42, STUDENT_1);
    assert!(!export_feedback_user_data(&db, &request, &mut writer).await.unwrap());
    assert!(!writer.has_any_data(context));

    let request = PluginRequestData::new(context, 1);
    assert!(!export_feedback_user_data(&db, &request, &mut writer).await.unwrap());
    assert_eq!(writer.entry_count(context), 0);
}

#[tokio::test]
async fn test_export_is_nested_under_subcontext() {
    let db = setup_test_db().await;
    let plugin = assignment(&db, 1);
    let context = plugin.context();
    create_feedback(&plugin, 1, STUDENT_1, "<p>nested</p>").await;

    let mut writer = ExportTree::new();
    let request = PluginRequestData::new(context, 1)
        .for_grade(1, STUDENT_1)
        .with_subcontext(vec!["Attempt 1".to_string()]);
    export_feedback_user_data(&db, &request, &mut writer).await.unwrap();

    assert!(writer.get_data(context, &[EXPORT_PATH]).is_none());
    assert_eq!(
        writer.get_data(context, &["Attempt 1", EXPORT_PATH]).unwrap()["commenttext"],
        "<p>nested</p>"
    );
}

#[tokio::test]
async fn test_delete_feedback_for_context() {
    let db = setup_test_db().await;
    let plugin = assignment(&db, 1);
    let other = assignment(&db, 2);

    let grade1 = create_feedback(&plugin, 1, STUDENT_1, "<p>first comment for this test</p>").await;
    let grade2 = create_feedback(&plugin, 2, STUDENT_2, "<p>Comment for second student.</p>").await;
    let grade3 = create_feedback(&other, 3, STUDENT_1, "<p>Another assignment.</p>").await;

    assert!(plugin.fetch(grade1.id).await.unwrap().is_some());
    assert!(plugin.fetch(grade2.id).await.unwrap().is_some());

    let request = PluginRequestData::new(plugin.context(), plugin.assignment_id());
    assert_eq!(delete_feedback_for_context(&db, &request).await.unwrap(), 2);

    assert!(plugin.fetch(grade1.id).await.unwrap().is_none());
    assert!(plugin.fetch(grade2.id).await.unwrap().is_none());
    assert!(other.fetch(grade3.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_feedback_for_grade() {
    let db = setup_test_db().await;
    let plugin = assignment(&db, 1);

    let grade1 = create_feedback(&plugin, 1, STUDENT_1, "<p>first comment for this test</p>").await;
    let grade2 = create_feedback(&plugin, 2, STUDENT_2, "<p>Comment for second student.</p>").await;

    let request = PluginRequestData::new(plugin.context(), 1).for_grade(grade1.id, STUDENT_1);
    assert_eq!(delete_feedback_for_grade(&db, &request).await.unwrap(), 1);

    assert!(plugin.fetch(grade1.id).await.unwrap().is_none());
    assert!(plugin.fetch(grade2.id).await.unwrap().is_some());

    // Already gone.
    assert_eq!(delete_feedback_for_grade(&db, &request).await.unwrap(), 0);

    // A request without a grade removes nothing.
    let request = PluginRequestData::new(plugin.context(), 1);
    assert_eq!(delete_feedback_for_grade(&db, &request).await.unwrap(), 0);
    assert!(plugin.fetch(grade2.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_feedback_for_grades() {
    let db = setup_test_db().await;
    let assign1 = assignment(&db, 1);
    let assign2 = assignment(&db, 2);

    let grade1 = create_feedback(&assign1, 1, STUDENT_1, "<p>first comment for this test</p>").await;
    let grade2 = create_feedback(&assign1, 2, STUDENT_2, "<p>Comment for second student.</p>").await;
    let grade3 = create_feedback(&assign1, 3, STUDENT_3, "<p>Comment for third student.</p>").await;
    let grade4 = create_feedback(
        &assign2,
        4,
        STUDENT_3,
        "<p>Comment for third student in the second assignment.</p>",
    )
    .await;
    let grade5 = create_feedback(
        &assign2,
        5,
        STUDENT_4,
        "<p>Comment for fourth student in the second assignment.</p>",
    )
    .await;

    for grade in [&grade1, &grade2, &grade3, &grade4, &grade5] {
        assert!(!assign1.is_empty(grade.id).await.unwrap());
    }

    // Students 1 and 3 in the first assignment.
    let request = PluginRequestData::new(assign1.context(), assign1.assignment_id())
        .with_grade_ids(vec![grade1.id, grade3.id]);
    assert_eq!(delete_feedback_for_grades(&db, &request).await.unwrap(), 2);

    assert!(assign1.fetch(grade1.id).await.unwrap().is_none());
    assert!(assign1.fetch(grade2.id).await.unwrap().is_some());
    assert!(assign1.fetch(grade3.id).await.unwrap().is_none());
    assert!(assign2.fetch(grade4.id).await.unwrap().is_some());
    assert!(assign2.fetch(grade5.id).await.unwrap().is_some());

    // Repeating the request is harmless.
    assert_eq!(delete_feedback_for_grades(&db, &request).await.unwrap(), 0);

    let empty = PluginRequestData::new(assign2.context(), assign2.assignment_id());
    assert_eq!(delete_feedback_for_grades(&db, &empty).await.unwrap(), 0);
    assert!(assign2.fetch(grade4.id).await.unwrap().is_some());
}
