pub mod assign;
pub mod error;
pub mod feedback_writeup_service;
pub mod form;
pub mod format;
pub mod input;
pub mod lang;
pub mod plugin;
pub mod privacy;
pub mod submission_text;
pub mod upgrade;

#[cfg(test)]
mod tests;

pub use error::{FeedbackError, FeedbackResult};
pub use feedback_writeup_service::WriteupFeedback;
pub use plugin::FeedbackPlugin;
