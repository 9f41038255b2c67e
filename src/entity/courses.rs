//! 课程实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub subject: String,
    pub number: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::Subject",
        to = "super::departments::Column::Subject"
    )]
    Department,
    #[sea_orm(has_many = "super::classes::Entity")]
    Classes,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Classes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_course(self) -> crate::models::courses::entities::Course {
        crate::models::courses::entities::Course {
            id: self.id,
            subject: self.subject,
            number: self.number,
            name: self.name,
        }
    }
}
