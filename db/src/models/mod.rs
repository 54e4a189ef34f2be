pub mod feedback_writeup;

pub use feedback_writeup::Entity as FeedbackWriteup;
