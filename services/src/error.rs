use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("database error: {0}")]
    Db(#[from] DbErr),

    #[error("could not convert legacy feedback for grade {grade_id}: {source}")]
    Upgrade {
        grade_id: i64,
        #[source]
        source: DbErr,
    },

    #[error("failed to serialise export data: {0}")]
    Export(#[from] serde_json::Error),
}

pub type FeedbackResult<T> = Result<T, FeedbackError>;
