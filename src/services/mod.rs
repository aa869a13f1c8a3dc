pub mod assignments;
pub mod courses;
pub mod enrollments;
pub mod gradebook;
pub mod lessons;
pub mod submissions;
pub mod users;

pub use assignments::AssignmentService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use gradebook::GradebookService;
pub use lessons::LessonService;
pub use submissions::SubmissionService;
pub use users::UserService;
