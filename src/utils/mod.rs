pub mod extractor;
pub mod parameter_error_handler;
pub mod sql;
pub mod validate;

pub use extractor::{
    SafeAssignmentIdI64, SafeCourseIdI64, SafeIDI64, SafeLearnerIdI64, SafeLessonIdI64,
    SafeSubmissionIdI64,
};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;
pub use sql::escape_like_pattern;
