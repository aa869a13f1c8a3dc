use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    courses::{
        entities::{Course, CourseStatus},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
        responses::CourseListResponse,
    },
    enrollments::{
        entities::Enrollment, requests::EnrollmentListQuery, responses::EnrollmentListResponse,
    },
    lessons::{
        entities::Lesson,
        requests::CreateLessonRequest,
        responses::{CompleteLessonResponse, LessonListResponse},
    },
    submissions::{
        entities::Submission,
        requests::{SubmissionListQuery, SubmitRequest},
        responses::SubmissionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;

    /// 课程管理方法
    // 创建课程
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 通过ID获取课程信息
    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>>;
    // 列出课程
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse>;
    // 更新课程信息
    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>>;
    // 更新课程状态（状态机校验由服务层完成）
    async fn update_course_status(
        &self,
        course_id: i64,
        status: CourseStatus,
    ) -> Result<Option<Course>>;
    // 删除课程
    async fn delete_course(&self, course_id: i64) -> Result<bool>;

    /// 选课管理方法
    // 学员选课
    async fn enroll_learner(&self, course_id: i64, learner_id: i64) -> Result<Enrollment>;
    // 学员退课（连带清理该学员在课程内的提交与课时完成记录）
    async fn unenroll_learner(&self, course_id: i64, learner_id: i64) -> Result<bool>;
    // 获取选课记录
    async fn get_enrollment(&self, course_id: i64, learner_id: i64) -> Result<Option<Enrollment>>;
    // 列出选课记录
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse>;
    // 列出课程全部选课记录（聚合用，不分页）
    async fn list_course_enrollments(&self, course_id: i64) -> Result<Vec<Enrollment>>;
    // 统计课程选课人数
    async fn count_course_enrollments(&self, course_id: i64) -> Result<i64>;

    /// 课时管理方法
    // 创建课时
    async fn create_lesson(&self, course_id: i64, lesson: CreateLessonRequest) -> Result<Lesson>;
    // 通过ID获取课时信息
    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>>;
    // 按顺序列出课程课时
    async fn list_lessons(&self, course_id: i64) -> Result<LessonListResponse>;
    // 删除课时
    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool>;
    // 学员是否已完成课时
    async fn has_lesson_completion(&self, lesson_id: i64, learner_id: i64) -> Result<bool>;
    // 记录课时完成并重算选课进度
    async fn complete_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        learner_id: i64,
    ) -> Result<CompleteLessonResponse>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(
        &self,
        course_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业信息
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 列出课程全部作业（聚合用，不分页）
    async fn list_course_assignments(&self, course_id: i64) -> Result<Vec<Assignment>>;
    // 更新作业信息
    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;

    /// 提交管理方法
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 获取学员在某作业下的唯一提交
    async fn get_submission_by_assignment_and_learner(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<Option<Submission>>;
    // 首次提交
    async fn create_submission(
        &self,
        assignment_id: i64,
        request: SubmitRequest,
        is_late: bool,
    ) -> Result<Submission>;
    // 重交：覆盖原记录、清空评分、回到 pending（乐观锁 CAS）
    async fn resubmit_submission(
        &self,
        existing: &Submission,
        request: SubmitRequest,
        is_late: bool,
    ) -> Result<Submission>;
    // 评分（乐观锁 CAS）
    async fn grade_submission(
        &self,
        submission_id: i64,
        lock_version: i32,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Submission>;
    // 退回修改（乐观锁 CAS，不给分）
    async fn return_submission_for_revision(
        &self,
        submission_id: i64,
        lock_version: i32,
        feedback: Option<String>,
    ) -> Result<Submission>;
    // 列出提交
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;

    /// 成绩册聚合取数方法
    // 课程全部提交（跨作业，聚合用）
    async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<Submission>>;
    // 作业全部提交（聚合用）
    async fn list_assignment_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>>;
    // 批量获取用户（排名展示用）
    async fn get_users_by_ids(&self, ids: Vec<i64>) -> Result<Vec<User>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
