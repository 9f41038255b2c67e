//! 课程存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::departments::Entity as Departments;
use crate::errors::{LmsError, Result};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建课程
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let department = Departments::find_by_id(req.subject.clone())
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询院系失败: {e}")))?;

        if department.is_none() {
            return Err(LmsError::not_found(format!(
                "Department {} not found",
                req.subject
            )));
        }

        let duplicates = Courses::find()
            .filter(Column::Subject.eq(req.subject.as_str()))
            .filter(Column::Number.eq(req.number))
            .count(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询课程失败: {e}")))?;

        if duplicates > 0 {
            return Err(LmsError::conflict(format!(
                "Course {} {} already exists",
                req.subject, req.number
            )));
        }

        let model = ActiveModel {
            subject: Set(req.subject),
            number: Set(req.number),
            name: Set(req.name),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建课程失败"))?;

        Ok(result.into_course())
    }
}
