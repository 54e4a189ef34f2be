pub mod m202610180001_create_feedback_writeup;
