//! 提交实体（作业 + 学生 复合主键）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub assignment_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_uid: String,
    pub score: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub contents: Option<String>,
    pub submitted_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignments::Entity",
        from = "Column::AssignmentId",
        to = "super::assignments::Column::Id"
    )]
    Assignment,
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_submission(self) -> crate::models::submissions::entities::Submission {
        use chrono::{DateTime, Utc};

        crate::models::submissions::entities::Submission {
            assignment_id: self.assignment_id,
            student_uid: self.student_uid,
            score: self.score.and_then(|s| u16::try_from(s).ok()),
            contents: self.contents,
            submitted_at: DateTime::<Utc>::from_timestamp(self.submitted_at, 0)
                .unwrap_or_default(),
        }
    }
}
