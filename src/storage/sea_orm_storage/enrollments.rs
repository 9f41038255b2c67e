//! 选课存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::errors::{LmsError, Result};
use crate::grading::LetterGrade;
use crate::models::enrollments::entities::Enrollment;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 学生选课，初始成绩为 "--"
    pub async fn enroll_student_impl(&self, class_id: i64, student_uid: &str) -> Result<Enrollment> {
        let enrolled = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::StudentUid.eq(student_uid))
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询选课失败: {e}")))?;

        if enrolled > 0 {
            return Err(LmsError::conflict(format!(
                "Student {student_uid} is already enrolled in class {class_id}"
            )));
        }

        let model = ActiveModel {
            class_id: Set(class_id),
            student_uid: Set(student_uid.to_string()),
            letter_grade: Set(LetterGrade::Ungraded.to_string()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("选课失败"))?;

        Ok(result.into_enrollment())
    }

    /// 列出学生所有选课的字母成绩
    pub async fn list_student_letter_grades_impl(&self, student_uid: &str) -> Result<Vec<String>> {
        let enrollments = Enrollments::find()
            .filter(Column::StudentUid.eq(student_uid))
            .all(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询选课失败: {e}")))?;

        Ok(enrollments.into_iter().map(|m| m.letter_grade).collect())
    }
}
