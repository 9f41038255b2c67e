//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub max_points: i32,
    #[sea_orm(column_type = "Text")]
    pub contents: String,
    pub due_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment_categories::Entity",
        from = "Column::CategoryId",
        to = "super::assignment_categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::assignment_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use chrono::{DateTime, Utc};

        crate::models::assignments::entities::Assignment {
            id: self.id,
            category_id: self.category_id,
            name: self.name,
            max_points: u16::try_from(self.max_points).unwrap_or(0),
            contents: self.contents,
            due_at: DateTime::<Utc>::from_timestamp(self.due_at, 0).unwrap_or_default(),
        }
    }
}
