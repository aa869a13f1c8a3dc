//! 提交存储操作
//!
//! 所有写入都以 (id, lock_version) 为条件做 CAS 更新，命中 0 行
//! 即视为并发冲突；(assignment_id, learner_id) 唯一索引保证每个
//! 学员在每个作业下只有一条记录。

use super::SeaOrmStorage;
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{SubmissionListQuery, SubmitRequest},
        responses::{SubmissionListItem, SubmissionLearner, SubmissionListResponse},
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use std::collections::HashMap;

// 文件引用列表以 JSON 文本落库
fn serialize_file_refs(file_refs: &Option<Vec<String>>) -> Result<Option<String>> {
    match file_refs {
        Some(refs) => serde_json::to_string(refs)
            .map(Some)
            .map_err(|e| LMSystemError::serialization(format!("文件引用序列化失败: {e}"))),
        None => Ok(None),
    }
}

impl SeaOrmStorage {
    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 获取学员在某作业下的唯一提交
    pub async fn get_submission_by_assignment_and_learner_impl(
        &self,
        assignment_id: i64,
        learner_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::LearnerId.eq(learner_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 首次提交
    pub async fn create_submission_impl(
        &self,
        assignment_id: i64,
        request: SubmitRequest,
        is_late: bool,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            assignment_id: Set(assignment_id),
            learner_id: Set(request.learner_id),
            content: Set(request.content),
            file_refs: Set(serialize_file_refs(&request.file_refs)?),
            github_url: Set(request.github_url),
            status: Set(SubmissionStatus::Pending.to_string()),
            score: Set(None),
            feedback: Set(None),
            attempt: Set(1),
            is_late: Set(is_late),
            lock_version: Set(0),
            submitted_at: Set(now),
            graded_at: Set(None),
            ..Default::default()
        };

        // 并发首次提交由唯一索引兜底，落败方按冲突处理
        let result = model.insert(&self.db).await.map_err(|e| {
            if matches!(
                e.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                LMSystemError::conflict(format!(
                    "submission for assignment {assignment_id} already exists"
                ))
            } else {
                LMSystemError::database_operation(format!("创建提交失败: {e}"))
            }
        })?;

        Ok(result.into_submission())
    }

    /// 重交：覆盖原记录内容、清空评分、回到待批改
    pub async fn resubmit_submission_impl(
        &self,
        existing: &Submission,
        request: SubmitRequest,
        is_late: bool,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let result = Submissions::update_many()
            .col_expr(Column::Content, Expr::value(request.content))
            .col_expr(
                Column::FileRefs,
                Expr::value(serialize_file_refs(&request.file_refs)?),
            )
            .col_expr(Column::GithubUrl, Expr::value(request.github_url))
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Pending.to_string()),
            )
            .col_expr(Column::Score, Expr::value(Option::<f64>::None))
            .col_expr(Column::Feedback, Expr::value(Option::<String>::None))
            .col_expr(Column::Attempt, Expr::value(existing.attempt + 1))
            .col_expr(Column::IsLate, Expr::value(is_late))
            .col_expr(Column::SubmittedAt, Expr::value(now))
            .col_expr(Column::GradedAt, Expr::value(Option::<i64>::None))
            .col_expr(Column::LockVersion, Expr::value(existing.lock_version + 1))
            .filter(
                Condition::all()
                    .add(Column::Id.eq(existing.id))
                    .add(Column::LockVersion.eq(existing.lock_version)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("重交失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(LMSystemError::conflict(format!(
                "submission {} was modified concurrently",
                existing.id
            )));
        }

        self.get_submission_by_id_impl(existing.id)
            .await?
            .ok_or_else(|| {
                LMSystemError::database_operation(format!("重交后读取提交 {} 失败", existing.id))
            })
    }

    /// 评分：写入分数与评语，状态置为已评分；未提供评语时保留原评语
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        lock_version: i32,
        score: f64,
        feedback: Option<String>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let mut update = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Graded.to_string()),
            )
            .col_expr(Column::Score, Expr::value(Some(score)))
            .col_expr(Column::GradedAt, Expr::value(Some(now)))
            .col_expr(Column::LockVersion, Expr::value(lock_version + 1));

        if let Some(feedback) = feedback {
            update = update.col_expr(Column::Feedback, Expr::value(Some(feedback)));
        }

        let result = update
            .filter(
                Condition::all()
                    .add(Column::Id.eq(submission_id))
                    .add(Column::LockVersion.eq(lock_version)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("评分失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(LMSystemError::conflict(format!(
                "submission {submission_id} was modified concurrently"
            )));
        }

        self.get_submission_by_id_impl(submission_id)
            .await?
            .ok_or_else(|| {
                LMSystemError::database_operation(format!("评分后读取提交 {submission_id} 失败"))
            })
    }

    /// 退回修改：不给分，分数清空；未提供评语时保留原评语
    pub async fn return_submission_for_revision_impl(
        &self,
        submission_id: i64,
        lock_version: i32,
        feedback: Option<String>,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let mut update = Submissions::update_many()
            .col_expr(
                Column::Status,
                Expr::value(SubmissionStatus::Returned.to_string()),
            )
            .col_expr(Column::Score, Expr::value(Option::<f64>::None))
            .col_expr(Column::GradedAt, Expr::value(Some(now)))
            .col_expr(Column::LockVersion, Expr::value(lock_version + 1));

        if let Some(feedback) = feedback {
            update = update.col_expr(Column::Feedback, Expr::value(Some(feedback)));
        }

        let result = update
            .filter(
                Condition::all()
                    .add(Column::Id.eq(submission_id))
                    .add(Column::LockVersion.eq(lock_version)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("退回修改失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(LMSystemError::conflict(format!(
                "submission {submission_id} was modified concurrently"
            )));
        }

        self.get_submission_by_id_impl(submission_id)
            .await?
            .ok_or_else(|| {
                LMSystemError::database_operation(format!("退回后读取提交 {submission_id} 失败"))
            })
    }

    /// 分页列出提交（附学员信息）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        if let Some(learner_id) = query.learner_id {
            select = select.filter(Column::LearnerId.eq(learner_id));
        }

        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::SubmittedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量补全学员信息
        let learner_ids: Vec<i64> = submissions.iter().map(|s| s.learner_id).collect();
        let users: HashMap<i64, _> = self
            .get_users_by_ids_impl(learner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let items = submissions
            .into_iter()
            .map(|m| {
                let submission = m.into_submission();
                let learner = users
                    .get(&submission.learner_id)
                    .map(|u| SubmissionLearner {
                        id: u.id,
                        username: u.username.clone(),
                        display_name: u.display_name.clone(),
                    })
                    .unwrap_or(SubmissionLearner {
                        id: submission.learner_id,
                        username: String::new(),
                        display_name: None,
                    });

                SubmissionListItem {
                    id: submission.id,
                    assignment_id: submission.assignment_id,
                    learner_id: submission.learner_id,
                    learner,
                    status: submission.status.to_string(),
                    score: submission.score,
                    attempt: submission.attempt,
                    is_late: submission.is_late,
                    submitted_at: submission.submitted_at.to_rfc3339(),
                    graded_at: submission.graded_at.map(|t| t.to_rfc3339()),
                }
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 课程全部提交（跨作业）
    pub async fn list_course_submissions_impl(&self, course_id: i64) -> Result<Vec<Submission>> {
        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程作业失败: {e}")))?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if assignment_ids.is_empty() {
            return Ok(vec![]);
        }

        let submissions = Submissions::find()
            .filter(Column::AssignmentId.is_in(assignment_ids))
            .order_by_asc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程提交失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 作业全部提交
    pub async fn list_assignment_submissions_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Vec<Submission>> {
        let submissions = Submissions::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::SubmittedAt)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业提交失败: {e}")))?;

        Ok(submissions.into_iter().map(|m| m.into_submission()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assignments::entities::AssignmentKind;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::users::entities::UserRole;
    use crate::models::users::requests::CreateUserRequest;
    use migration::{Migrator, MigratorTrait};

    async fn setup_storage() -> SeaOrmStorage {
        let db = sea_orm::Database::connect("sqlite::memory:")
            .await
            .expect("connect in-memory sqlite");
        Migrator::up(&db, None).await.expect("run migrations");
        SeaOrmStorage { db }
    }

    // 建好外键链路：教师 + 学员 + 课程 + 作业，返回 (assignment_id, learner_id)
    async fn seed_assignment(storage: &SeaOrmStorage) -> (i64, i64) {
        let teacher = storage
            .create_user_impl(CreateUserRequest {
                username: "teacher01".to_string(),
                email: "teacher01@example.com".to_string(),
                role: UserRole::Teacher,
                display_name: None,
            })
            .await
            .unwrap();
        let learner = storage
            .create_user_impl(CreateUserRequest {
                username: "learner01".to_string(),
                email: "learner01@example.com".to_string(),
                role: UserRole::Student,
                display_name: None,
            })
            .await
            .unwrap();
        let course = storage
            .create_course_impl(CreateCourseRequest {
                teacher_id: teacher.id,
                title: "Rust 入门".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let assignment = storage
            .create_assignment_impl(
                course.id,
                CreateAssignmentRequest {
                    title: "课程论文".to_string(),
                    description: None,
                    kind: AssignmentKind::Practical,
                    max_score: 100.0,
                    passing_score: None,
                    due_date: None,
                    time_limit_minutes: None,
                    max_attempts: None,
                    questions: None,
                },
            )
            .await
            .unwrap();
        (assignment.id, learner.id)
    }

    fn submit_request(learner_id: i64, content: &str) -> SubmitRequest {
        SubmitRequest {
            learner_id,
            content: Some(content.to_string()),
            file_refs: None,
            github_url: None,
        }
    }

    #[tokio::test]
    async fn test_grade_twice_is_idempotent() {
        let storage = setup_storage().await;
        let (assignment_id, learner_id) = seed_assignment(&storage).await;

        let submission = storage
            .create_submission_impl(assignment_id, submit_request(learner_id, "my essay"), false)
            .await
            .unwrap();

        let first = storage
            .grade_submission_impl(submission.id, submission.lock_version, 80.0, Some("good".to_string()))
            .await
            .unwrap();
        let second = storage
            .grade_submission_impl(first.id, first.lock_version, 80.0, Some("good".to_string()))
            .await
            .unwrap();

        assert_eq!(second.status, SubmissionStatus::Graded);
        assert_eq!(second.score, Some(80.0));
        assert_eq!(second.feedback.as_deref(), Some("good"));
        assert!(second.graded_at.is_some());
    }

    #[tokio::test]
    async fn test_grade_with_stale_lock_version_conflicts_and_keeps_state() {
        let storage = setup_storage().await;
        let (assignment_id, learner_id) = seed_assignment(&storage).await;

        let submission = storage
            .create_submission_impl(assignment_id, submit_request(learner_id, "my essay"), false)
            .await
            .unwrap();

        storage
            .grade_submission_impl(submission.id, submission.lock_version, 80.0, Some("good".to_string()))
            .await
            .unwrap();

        // 用过期的 lock_version 再评一次，必须拒绝且不动原记录
        let stale = storage
            .grade_submission_impl(submission.id, submission.lock_version, 60.0, None)
            .await;
        assert!(matches!(stale, Err(LMSystemError::Conflict(_))));

        let current = storage
            .get_submission_by_id_impl(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.score, Some(80.0));
        assert_eq!(current.status, SubmissionStatus::Graded);
    }

    #[tokio::test]
    async fn test_resubmit_clears_grade_state_and_reenters_pending() {
        let storage = setup_storage().await;
        let (assignment_id, learner_id) = seed_assignment(&storage).await;

        let submission = storage
            .create_submission_impl(assignment_id, submit_request(learner_id, "draft 1"), false)
            .await
            .unwrap();
        let graded = storage
            .grade_submission_impl(submission.id, submission.lock_version, 95.0, Some("great".to_string()))
            .await
            .unwrap();

        let resubmitted = storage
            .resubmit_submission_impl(&graded, submit_request(learner_id, "draft 2"), false)
            .await
            .unwrap();

        assert_eq!(resubmitted.status, SubmissionStatus::Pending);
        assert_eq!(resubmitted.score, None);
        assert_eq!(resubmitted.feedback, None);
        assert!(resubmitted.graded_at.is_none());
        assert_eq!(resubmitted.attempt, 2);
        assert_eq!(resubmitted.content.as_deref(), Some("draft 2"));
    }

    #[tokio::test]
    async fn test_regrade_without_feedback_keeps_previous_feedback() {
        let storage = setup_storage().await;
        let (assignment_id, learner_id) = seed_assignment(&storage).await;

        let submission = storage
            .create_submission_impl(assignment_id, submit_request(learner_id, "my essay"), false)
            .await
            .unwrap();
        let first = storage
            .grade_submission_impl(submission.id, submission.lock_version, 80.0, Some("good".to_string()))
            .await
            .unwrap();

        let regraded = storage
            .grade_submission_impl(first.id, first.lock_version, 85.0, None)
            .await
            .unwrap();

        assert_eq!(regraded.score, Some(85.0));
        assert_eq!(regraded.feedback.as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_returned_submission_can_be_graded() {
        let storage = setup_storage().await;
        let (assignment_id, learner_id) = seed_assignment(&storage).await;

        let submission = storage
            .create_submission_impl(assignment_id, submit_request(learner_id, "my essay"), false)
            .await
            .unwrap();
        let returned = storage
            .return_submission_for_revision_impl(
                submission.id,
                submission.lock_version,
                Some("rework the intro".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(returned.status, SubmissionStatus::Returned);
        assert_eq!(returned.score, None);

        // 教师也可以直接对退回状态评分，无需等学员重交
        let graded = storage
            .grade_submission_impl(returned.id, returned.lock_version, 70.0, None)
            .await
            .unwrap();
        assert_eq!(graded.status, SubmissionStatus::Graded);
        assert_eq!(graded.score, Some(70.0));
        assert_eq!(graded.feedback.as_deref(), Some("rework the intro"));
    }

    #[tokio::test]
    async fn test_duplicate_first_submission_is_conflict() {
        let storage = setup_storage().await;
        let (assignment_id, learner_id) = seed_assignment(&storage).await;

        storage
            .create_submission_impl(assignment_id, submit_request(learner_id, "first"), false)
            .await
            .unwrap();

        // 并发首次提交的落败方撞唯一索引
        let duplicate = storage
            .create_submission_impl(assignment_id, submit_request(learner_id, "second"), false)
            .await;
        assert!(matches!(duplicate, Err(LMSystemError::Conflict(_))));
    }
}
