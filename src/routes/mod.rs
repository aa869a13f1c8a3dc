pub mod assignments;
pub mod courses;
pub mod enrollments;
pub mod gradebook;
pub mod lessons;
pub mod submissions;
pub mod users;

pub use assignments::configure_assignment_routes;
pub use courses::configure_course_routes;
pub use enrollments::configure_enrollment_routes;
pub use gradebook::configure_gradebook_routes;
pub use lessons::configure_lesson_routes;
pub use submissions::configure_submission_routes;
pub use users::configure_user_routes;
