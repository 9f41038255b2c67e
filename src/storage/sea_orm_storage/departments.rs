//! 院系存储操作

use super::{SeaOrmStorage, db_error};
use crate::entity::departments::{ActiveModel, Entity as Departments};
use crate::errors::{LmsError, Result};
use crate::models::departments::{entities::Department, requests::CreateDepartmentRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 创建院系
    pub async fn create_department_impl(
        &self,
        req: CreateDepartmentRequest,
    ) -> Result<Department> {
        let existing = Departments::find_by_id(req.subject.clone())
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询院系失败: {e}")))?;

        if existing.is_some() {
            return Err(LmsError::conflict(format!(
                "Department {} already exists",
                req.subject
            )));
        }

        let model = ActiveModel {
            subject: Set(req.subject),
            name: Set(req.name),
        };

        let result = model.insert(&self.db).await.map_err(db_error("创建院系失败"))?;

        Ok(result.into_department())
    }
}
