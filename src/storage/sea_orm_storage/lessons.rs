//! 课时存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::lesson_completions::{
    ActiveModel as CompletionActiveModel, Column as CompletionColumn, Entity as LessonCompletions,
};
use crate::entity::lessons::{ActiveModel, Column, Entity as Lessons};
use crate::errors::{LMSystemError, Result};
use crate::models::lessons::{
    entities::Lesson,
    requests::CreateLessonRequest,
    responses::{CompleteLessonResponse, LessonListResponse},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建课时，未指定 position 时追加到课程末尾
    pub async fn create_lesson_impl(
        &self,
        course_id: i64,
        req: CreateLessonRequest,
    ) -> Result<Lesson> {
        let now = chrono::Utc::now().timestamp();

        let position = match req.position {
            Some(p) => p,
            None => {
                let last = Lessons::find()
                    .filter(Column::CourseId.eq(course_id))
                    .order_by_desc(Column::Position)
                    .limit(1)
                    .one(&self.db)
                    .await
                    .map_err(|e| {
                        LMSystemError::database_operation(format!("查询课时顺序失败: {e}"))
                    })?;
                last.map(|l| l.position + 1).unwrap_or(1)
            }
        };

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            content: Set(req.content),
            position: Set(position),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建课时失败: {e}")))?;

        Ok(result.into_lesson())
    }

    /// 通过 ID 获取课时
    pub async fn get_lesson_by_id_impl(&self, lesson_id: i64) -> Result<Option<Lesson>> {
        let result = Lessons::find_by_id(lesson_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课时失败: {e}")))?;

        Ok(result.map(|m| m.into_lesson()))
    }

    /// 按顺序列出课程课时
    pub async fn list_lessons_impl(&self, course_id: i64) -> Result<LessonListResponse> {
        let lessons = Lessons::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::Position)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课时列表失败: {e}")))?;

        Ok(LessonListResponse {
            items: lessons.into_iter().map(|m| m.into_lesson()).collect(),
        })
    }

    /// 删除课时
    pub async fn delete_lesson_impl(&self, lesson_id: i64) -> Result<bool> {
        let result = Lessons::delete_by_id(lesson_id)
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除课时失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 学员是否已完成课时
    pub async fn has_lesson_completion_impl(
        &self,
        lesson_id: i64,
        learner_id: i64,
    ) -> Result<bool> {
        let count = LessonCompletions::find()
            .filter(
                Condition::all()
                    .add(CompletionColumn::LessonId.eq(lesson_id))
                    .add(CompletionColumn::LearnerId.eq(learner_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课时完成记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 记录课时完成并重算选课进度
    ///
    /// 进度 = 已完成课时数 / 课程课时总数，取整百分比。进度到 100
    /// 时写入结课时间；并发重复完成由唯一索引兜底。
    pub async fn complete_lesson_impl(
        &self,
        course_id: i64,
        lesson_id: i64,
        learner_id: i64,
    ) -> Result<CompleteLessonResponse> {
        let now = chrono::Utc::now().timestamp();

        let model = CompletionActiveModel {
            lesson_id: Set(lesson_id),
            learner_id: Set(learner_id),
            completed_at: Set(now),
            ..Default::default()
        };

        model.insert(&self.db).await.map_err(|e| {
            if matches!(
                e.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                LMSystemError::conflict(format!(
                    "learner {learner_id} already completed lesson {lesson_id}"
                ))
            } else {
                LMSystemError::database_operation(format!("记录课时完成失败: {e}"))
            }
        })?;

        // 重算进度
        let lesson_ids: Vec<i64> = Lessons::find()
            .filter(Column::CourseId.eq(course_id))
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程课时失败: {e}")))?
            .into_iter()
            .map(|l| l.id)
            .collect();

        let total = lesson_ids.len() as i64;
        let completed = LessonCompletions::find()
            .filter(
                Condition::all()
                    .add(CompletionColumn::LearnerId.eq(learner_id))
                    .add(CompletionColumn::LessonId.is_in(lesson_ids)),
            )
            .count(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("统计课时完成数失败: {e}")))?
            as i64;

        let progress = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as i32
        } else {
            0
        };

        // 进度不足 100 时清空结课时间，课程后续新增课时会把进度拉回
        let completed_at = if progress >= 100 { Some(now) } else { None };

        Enrollments::update_many()
            .col_expr(EnrollmentColumn::Progress, Expr::value(progress))
            .col_expr(EnrollmentColumn::CompletedAt, Expr::value(completed_at))
            .filter(
                Condition::all()
                    .add(EnrollmentColumn::CourseId.eq(course_id))
                    .add(EnrollmentColumn::LearnerId.eq(learner_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新选课进度失败: {e}")))?;

        Ok(CompleteLessonResponse {
            lesson_id,
            learner_id,
            progress,
            course_completed_at: completed_at
                .and_then(|t| chrono::DateTime::from_timestamp(t, 0))
                .map(|t| t.to_rfc3339()),
        })
    }
}
