//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub kind: String,
    pub max_score: f64,
    pub passing_score: f64,
    pub due_date: Option<i64>,
    pub time_limit_minutes: Option<i32>,
    pub max_attempts: Option<i32>,
    // 题目列表，JSON 序列化存储（仅 test/quiz 类型使用）
    #[sea_orm(column_type = "Text", nullable)]
    pub questions: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, AssignmentKind};
        use chrono::{DateTime, Utc};

        let questions = self
            .questions
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok());

        Assignment {
            id: self.id,
            course_id: self.course_id,
            title: self.title,
            description: self.description,
            kind: self
                .kind
                .parse::<AssignmentKind>()
                .unwrap_or(AssignmentKind::Practical),
            max_score: self.max_score,
            passing_score: self.passing_score,
            due_date: self
                .due_date
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            time_limit_minutes: self.time_limit_minutes,
            max_attempts: self.max_attempts,
            questions,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
