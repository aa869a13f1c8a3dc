//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod courses;
mod enrollments;
mod lessons;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{LMSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LMSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LMSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LMSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LMSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    // 课程模块
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn get_course_by_id(&self, course_id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(course_id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<CourseListResponse> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        course_id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        self.update_course_impl(course_id, update).await
    }

    async fn update_course_status(
        &self,
        course_id: i64,
        status: CourseStatus,
    ) -> Result<Option<Course>> {
        self.update_course_status_impl(course_id, status).await
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool> {
        self.delete_course_impl(course_id).await
    }

    // 选课模块
    async fn enroll_learner(&self, course_id: i64, learner_id: i64) -> Result<Enrollment> {
        self.enroll_learner_impl(course_id, learner_id).await
    }

    async fn unenroll_learner(&self, course_id: i64, learner_id: i64) -> Result<bool> {
        self.unenroll_learner_impl(course_id, learner_id).await
    }

    async fn get_enrollment(&self, course_id: i64, learner_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(course_id, learner_id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        self.list_enrollments_with_pagination_impl(query).await
    }

    async fn list_course_enrollments(&self, course_id: i64) -> Result<Vec<Enrollment>> {
        self.list_course_enrollments_impl(course_id).await
    }

    async fn count_course_enrollments(&self, course_id: i64) -> Result<i64> {
        self.count_course_enrollments_impl(course_id).await
    }

    // 课时模块
    async fn create_lesson(&self, course_id: i64, lesson: CreateLessonRequest) -> Result<Lesson> {
        self.create_lesson_impl(course_id, lesson).await
    }

    async fn get_lesson_by_id(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        self.get_lesson_by_id_impl(lesson_id).await
    }

    async fn list_lessons(&self, course_id: i64) -> Result<LessonListResponse> {
        self.list_lessons_impl(course_id).await
    }

    async fn delete_lesson(&self, lesson_id: i64) -> Result<bool> {
        self.delete_lesson_impl(lesson_id).await
    }

    async fn has_lesson_completion(&self, lesson_id: i64, learner_id: i64) -> Result<bool> {
        self.has_lesson_completion_impl(lesson_id, learner_id).await
    }

    async fn complete_lesson(
        &self,
        course_id: i64,
        lesson_id: i64,
        learner_id: i64,
    ) -> Result<CompleteLessonResponse> {
        self.complete_lesson_impl(course_id, lesson_id, learner_id)
            .await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        course_id: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(course_id, assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn list_course_assignments(&self, course_id: i64) -> Result<Vec<Assignment>> {
        self.list_course_assignments_impl(course_id).await
    }

    async fn update_assignment(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(assignment_id, update).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    // 提交模块
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn get_submission_by_assignment_and_learner(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<Option<Submission>> {
        self.get_submission_by_assignment_and_learner_impl(assignment_id, learner_id)
            .await
    }

    async fn create_submission(
        &self,
        assignment_id: i64,
        request: SubmitRequest,
        is_late: bool,
    ) -> Result<Submission> {
        self.create_submission_impl(assignment_id, request, is_late)
            .await
    }

    async fn resubmit_submission(
        &self,
        existing: &Submission,
        request: SubmitRequest,
        is_late: bool,
    ) -> Result<Submission> {
        self.resubmit_submission_impl(existing, request, is_late)
            .await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        lock_version: i32,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Submission> {
        self.grade_submission_impl(submission_id, lock_version, score, feedback)
            .await
    }

    async fn return_submission_for_revision(
        &self,
        submission_id: i64,
        lock_version: i32,
        feedback: Option<String>,
    ) -> Result<Submission> {
        self.return_submission_for_revision_impl(submission_id, lock_version, feedback)
            .await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    // 成绩册聚合取数
    async fn list_course_submissions(&self, course_id: i64) -> Result<Vec<Submission>> {
        self.list_course_submissions_impl(course_id).await
    }

    async fn list_assignment_submissions(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.list_assignment_submissions_impl(assignment_id).await
    }

    async fn get_users_by_ids(&self, ids: Vec<i64>) -> Result<Vec<User>> {
        self.get_users_by_ids_impl(ids).await
    }
}
