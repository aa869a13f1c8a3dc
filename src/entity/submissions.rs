//! 提交实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub assignment_id: i64,
    pub learner_id: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    // 文件引用列表，JSON 序列化存储（引用不透明，内容校验由上传服务负责）
    #[sea_orm(column_type = "Text", nullable)]
    pub file_refs: Option<String>,
    pub github_url: Option<String>,
    pub status: String,
    pub score: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    pub attempt: i32,
    pub is_late: bool,
    // 乐观锁版本号，所有写入都以 (id, lock_version) 为条件
    pub lock_version: i32,
    pub submitted_at: i64,
    pub graded_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::LearnerId",
        to = "super::users::Column::Id"
    )]
    Learner,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Learner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use crate::models::submissions::entities::{Submission, SubmissionStatus};
        use chrono::{DateTime, Utc};

        let file_refs = self
            .file_refs
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok());

        Submission {
            id: self.id,
            assignment_id: self.assignment_id,
            learner_id: self.learner_id,
            content: self.content,
            file_refs,
            github_url: self.github_url,
            status: self
                .status
                .parse::<SubmissionStatus>()
                .unwrap_or(SubmissionStatus::Pending),
            score: self.score,
            feedback: self.feedback,
            attempt: self.attempt,
            is_late: self.is_late,
            lock_version: self.lock_version,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
            graded_at: self
                .graded_at
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
        }
    }
}
