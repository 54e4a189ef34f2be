//! Entity and storage helpers for writeup feedback attached to a grade.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};

/// How `comment_text` is interpreted when rendered.
///
/// Values match the host's integer format codes.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    sea_orm::strum::Display,
)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommentFormat {
    /// The host's own lightweight markup: raw HTML allowed, newlines become breaks.
    #[default]
    #[sea_orm(num_value = 0)]
    Markup,
    #[sea_orm(num_value = 1)]
    Html,
    #[sea_orm(num_value = 2)]
    Plain,
}

/// A grader's writeup comment for one grade.
///
/// At most one row exists per grade; `assignment` and `grade` never change
/// after insert.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "assignfeedback_writeup")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the assignment instance.
    pub assignment: i64,
    /// ID of the grade this comment belongs to.
    pub grade: i64,
    #[sea_orm(column_name = "commenttext", column_type = "Text")]
    pub comment_text: String,
    #[sea_orm(column_name = "commentformat")]
    pub comment_format: CommentFormat,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_by_grade<C>(db: &C, grade_id: i64) -> Result<Option<Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Entity::find()
            .filter(Column::Grade.eq(grade_id))
            .one(db)
            .await
    }

    pub async fn create<C>(
        db: &C,
        assignment_id: i64,
        grade_id: i64,
        comment_text: &str,
        comment_format: CommentFormat,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let active = ActiveModel {
            assignment: Set(assignment_id),
            grade: Set(grade_id),
            comment_text: Set(comment_text.to_owned()),
            comment_format: Set(comment_format),
            ..Default::default()
        };

        let model = active.insert(db).await?;
        log::debug!(
            "Inserted writeup {} for grade {} (assignment {})",
            model.id,
            grade_id,
            assignment_id
        );
        Ok(model)
    }

    /// Replaces the comment text and format in place.
    pub async fn set_comment<C>(
        self,
        db: &C,
        comment_text: &str,
        comment_format: CommentFormat,
    ) -> Result<Model, DbErr>
    where
        C: ConnectionTrait,
    {
        let id = self.id;
        let mut active: ActiveModel = self.into();
        active.comment_text = Set(comment_text.to_owned());
        active.comment_format = Set(comment_format);

        let model = active.update(db).await?;
        log::debug!("Updated writeup {} for grade {}", id, model.grade);
        Ok(model)
    }

    pub async fn delete_for_assignment<C>(db: &C, assignment_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = Entity::delete_many()
            .filter(Column::Assignment.eq(assignment_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn delete_for_grade<C>(db: &C, grade_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let res = Entity::delete_many()
            .filter(Column::Grade.eq(grade_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Deletes every row whose grade is in `grade_ids`. Unknown ids are skipped.
    pub async fn delete_for_grades<C>(db: &C, grade_ids: &[i64]) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        if grade_ids.is_empty() {
            return Ok(0);
        }

        let res = Entity::delete_many()
            .filter(Column::Grade.is_in(grade_ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
