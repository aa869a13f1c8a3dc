//! 选课存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::lesson_completions::{
    Column as CompletionColumn, Entity as LessonCompletions,
};
use crate::entity::lessons::{Column as LessonColumn, Entity as Lessons};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    enrollments::{
        entities::Enrollment,
        requests::EnrollmentListQuery,
        responses::{EnrollmentListItem, EnrollmentListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 学员选课
    pub async fn enroll_learner_impl(&self, course_id: i64, learner_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            course_id: Set(course_id),
            learner_id: Set(learner_id),
            progress: Set(0),
            enrolled_at: Set(now),
            ..Default::default()
        };

        // 并发重复选课由 (course_id, learner_id) 唯一索引兜底
        let result = model.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
                LMSystemError::conflict(format!(
                    "learner {learner_id} already enrolled in course {course_id}"
                ))
            } else {
                LMSystemError::database_operation(format!("选课失败: {e}"))
            }
        })?;

        Ok(result.into_enrollment())
    }

    /// 学员退课，连带删除该学员在课程内的提交与课时完成记录
    pub async fn unenroll_learner_impl(&self, course_id: i64, learner_id: i64) -> Result<bool> {
        // 删除该学员对课程作业的提交
        let assignment_ids: Vec<i64> = self
            .list_course_assignments_impl(course_id)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if !assignment_ids.is_empty() {
            Submissions::delete_many()
                .filter(
                    Condition::all()
                        .add(SubmissionColumn::LearnerId.eq(learner_id))
                        .add(SubmissionColumn::AssignmentId.is_in(assignment_ids)),
                )
                .exec(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("清理学员提交记录失败: {e}"))
                })?;
        }

        // 删除该学员在课程内的课时完成记录
        let lesson_ids: Vec<i64> = Lessons::find()
            .filter(LessonColumn::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程课时失败: {e}")))?
            .into_iter()
            .map(|l| l.id)
            .collect();

        if !lesson_ids.is_empty() {
            LessonCompletions::delete_many()
                .filter(
                    Condition::all()
                        .add(CompletionColumn::LearnerId.eq(learner_id))
                        .add(CompletionColumn::LessonId.is_in(lesson_ids)),
                )
                .exec(&self.db)
                .await
                .map_err(|e| {
                    LMSystemError::database_operation(format!("清理课时完成记录失败: {e}"))
                })?;
        }

        let result = Enrollments::delete_many()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::LearnerId.eq(learner_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("退课失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 获取选课记录
    pub async fn get_enrollment_impl(
        &self,
        course_id: i64,
        learner_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::CourseId.eq(course_id))
                    .add(Column::LearnerId.eq(learner_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 分页列出选课记录（附学员信息）
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Enrollments::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        if let Some(learner_id) = query.learner_id {
            select = select.filter(Column::LearnerId.eq(learner_id));
        }

        select = select.order_by_desc(Column::EnrolledAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课页数失败: {e}")))?;

        let enrollments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询选课列表失败: {e}")))?;

        // 批量补全学员信息
        let learner_ids: Vec<i64> = enrollments.iter().map(|e| e.learner_id).collect();
        let users: HashMap<i64, _> = self
            .get_users_by_ids_impl(learner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        let items = enrollments
            .into_iter()
            .map(|m| {
                let enrollment = m.into_enrollment();
                let (username, display_name) = users
                    .get(&enrollment.learner_id)
                    .map(|u| (u.username.clone(), u.display_name.clone()))
                    .unwrap_or_default();

                EnrollmentListItem {
                    id: enrollment.id,
                    course_id: enrollment.course_id,
                    learner_id: enrollment.learner_id,
                    learner_username: username,
                    learner_display_name: display_name,
                    progress: enrollment.progress,
                    enrolled_at: enrollment.enrolled_at.to_rfc3339(),
                    completed_at: enrollment.completed_at.map(|t| t.to_rfc3339()),
                }
            })
            .collect();

        Ok(EnrollmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出课程全部选课记录
    pub async fn list_course_enrollments_impl(&self, course_id: i64) -> Result<Vec<Enrollment>> {
        let enrollments = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::EnrolledAt)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程选课失败: {e}")))?;

        Ok(enrollments.into_iter().map(|m| m.into_enrollment()).collect())
    }

    /// 统计课程选课人数
    pub async fn count_course_enrollments_impl(&self, course_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(Column::CourseId.eq(course_id))
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计选课人数失败: {e}")))?;

        Ok(count as i64)
    }
}
