//! 选课实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "enrollments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub student_uid: String,
    pub letter_grade: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::classes::Entity",
        from = "Column::ClassId",
        to = "super::classes::Column::Id"
    )]
    Class,
}

impl Related<super::classes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    // 无法识别的成绩字符串按未评分处理
    pub fn into_enrollment(self) -> crate::models::enrollments::entities::Enrollment {
        use crate::grading::LetterGrade;

        crate::models::enrollments::entities::Enrollment {
            id: self.id,
            class_id: self.class_id,
            student_uid: self.student_uid,
            letter_grade: self
                .letter_grade
                .parse()
                .unwrap_or(LetterGrade::Ungraded),
        }
    }
}
