//! 开课实体
//!
//! 上课时间以当天零点起的秒数存储。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub season: String,
    pub year: i32,
    pub location: String,
    pub start_time: i32,
    pub end_time: i32,
    pub instructor_uid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::assignment_categories::Entity")]
    AssignmentCategories,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::assignment_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignmentCategories.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_class(self) -> crate::models::classes::entities::Class {
        use crate::models::classes::entities::Class;
        use chrono::NaiveTime;

        let to_time = |secs: i32| {
            u32::try_from(secs)
                .ok()
                .and_then(|secs| NaiveTime::from_num_seconds_from_midnight_opt(secs, 0))
                .unwrap_or_default()
        };

        Class {
            id: self.id,
            course_id: self.course_id,
            season: self.season,
            year: self.year,
            location: self.location,
            start_time: to_time(self.start_time),
            end_time: to_time(self.end_time),
            instructor_uid: self.instructor_uid,
        }
    }
}
