//! 作业存储操作

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{LMSystemError, Result};
use crate::models::{
    PaginationInfo,
    assignments::{
        entities::{Assignment, Question},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

// 题目列表以 JSON 文本落库
fn serialize_questions(questions: &[Question]) -> Result<String> {
    serde_json::to_string(questions)
        .map_err(|e| LMSystemError::serialization(format!("题目序列化失败: {e}")))
}

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(
        &self,
        course_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now().timestamp();

        let questions = match req.questions {
            Some(ref qs) => Some(serialize_questions(qs)?),
            None => None,
        };

        let model = ActiveModel {
            course_id: Set(course_id),
            title: Set(req.title),
            description: Set(req.description),
            kind: Set(req.kind.to_string()),
            max_score: Set(req.max_score),
            passing_score: Set(req.passing_score.unwrap_or(60.0)),
            due_date: Set(req.due_date.map(|d| d.timestamp())),
            time_limit_minutes: Set(req.time_limit_minutes),
            max_attempts: Set(req.max_attempts),
            questions: Set(questions),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assignments::find();

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }

        // 类型筛选
        if let Some(ref kind) = query.kind {
            select = select.filter(Column::Kind.eq(kind.to_string()));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业页数失败: {e}")))?;

        let assignments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: assignments
                .into_iter()
                .map(|m| m.into_assignment())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出课程全部作业
    pub async fn list_course_assignments_impl(&self, course_id: i64) -> Result<Vec<Assignment>> {
        let assignments = Assignments::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_asc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("查询课程作业失败: {e}")))?;

        Ok(assignments
            .into_iter()
            .map(|m| m.into_assignment())
            .collect())
    }

    /// 更新作业信息
    pub async fn update_assignment_impl(
        &self,
        assignment_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        // 先检查作业是否存在
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(assignment_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(title) = update.title {
            model.title = Set(title);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        if let Some(max_score) = update.max_score {
            model.max_score = Set(max_score);
        }

        if let Some(passing_score) = update.passing_score {
            model.passing_score = Set(passing_score);
        }

        if let Some(due_date) = update.due_date {
            model.due_date = Set(Some(due_date.timestamp()));
        }

        if let Some(time_limit_minutes) = update.time_limit_minutes {
            model.time_limit_minutes = Set(Some(time_limit_minutes));
        }

        if let Some(max_attempts) = update.max_attempts {
            model.max_attempts = Set(Some(max_attempts));
        }

        if let Some(ref questions) = update.questions {
            model.questions = Set(Some(serialize_questions(questions)?));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("更新作业失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 删除作业（级联删除提交）
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| LMSystemError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
