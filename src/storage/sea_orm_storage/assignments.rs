//! 作业分类与作业存储操作

use super::{SeaOrmStorage, db_error, grading};
use crate::entity::assignment_categories::{
    ActiveModel as CategoryActiveModel, Column as CategoryColumn, Entity as AssignmentCategories,
};
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{LmsError, Result};
use crate::models::assignments::{
    entities::{Assignment, AssignmentCategory},
    requests::NewAssignment,
};
use crate::models::grading::entities::StudentGrade;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建作业分类
    pub async fn create_category_impl(
        &self,
        class_id: i64,
        name: &str,
        weight: u8,
    ) -> Result<AssignmentCategory> {
        if self.find_category_id_impl(class_id, name).await?.is_some() {
            return Err(LmsError::conflict(format!(
                "Category {name} already exists in class {class_id}"
            )));
        }

        let model = CategoryActiveModel {
            class_id: Set(class_id),
            name: Set(name.to_string()),
            weight: Set(i32::from(weight)),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("创建作业分类失败"))?;

        Ok(result.into_category())
    }

    /// 通过名称查找作业分类ID
    pub async fn find_category_id_impl(&self, class_id: i64, name: &str) -> Result<Option<i64>> {
        let result = AssignmentCategories::find()
            .filter(CategoryColumn::ClassId.eq(class_id))
            .filter(CategoryColumn::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作业分类失败: {e}")))?;

        Ok(result.map(|m| m.id))
    }

    /// 创建作业并重算整门课的成绩
    ///
    /// 新作业改变每个选课学生的满分合计；插入与重算在同一写事务内完成，
    /// 重算失败时作业不会留存。
    pub async fn create_assignment_impl(
        &self,
        req: NewAssignment,
    ) -> Result<(Assignment, Vec<StudentGrade>)> {
        let txn = self.begin_write().await?;

        let category = AssignmentCategories::find_by_id(req.category_id)
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作业分类失败: {e}")))?
            .ok_or_else(|| LmsError::not_found(format!("Category {} not found", req.category_id)))?;

        if find_assignment_id(&txn, req.category_id, &req.name)
            .await?
            .is_some()
        {
            return Err(LmsError::conflict(format!(
                "Assignment {} already exists in category {}",
                req.name, req.category_id
            )));
        }

        let model = ActiveModel {
            category_id: Set(req.category_id),
            name: Set(req.name),
            max_points: Set(i32::from(req.max_points)),
            contents: Set(req.contents),
            due_at: Set(req.due_at.timestamp()),
            ..Default::default()
        };

        let assignment = model
            .insert(&txn)
            .await
            .map_err(db_error("创建作业失败"))?
            .into_assignment();

        let grades = grading::recompute_class(&txn, category.class_id).await?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok((assignment, grades))
    }

    /// 通过名称查找作业ID
    pub async fn find_assignment_id_impl(
        &self,
        category_id: i64,
        name: &str,
    ) -> Result<Option<i64>> {
        find_assignment_id(&self.db, category_id, name).await
    }
}

async fn find_assignment_id<C: ConnectionTrait>(
    conn: &C,
    category_id: i64,
    name: &str,
) -> Result<Option<i64>> {
    let result = Assignments::find()
        .filter(Column::CategoryId.eq(category_id))
        .filter(Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("查询作业失败: {e}")))?;

    Ok(result.map(|m| m.id))
}

/// 作业所属开课的ID
pub(super) async fn class_id_of_assignment<C: ConnectionTrait>(
    conn: &C,
    assignment_id: i64,
) -> Result<i64> {
    let assignment = Assignments::find_by_id(assignment_id)
        .one(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("查询作业失败: {e}")))?
        .ok_or_else(|| LmsError::not_found(format!("Assignment {assignment_id} not found")))?;

    let category = AssignmentCategories::find_by_id(assignment.category_id)
        .one(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("查询作业分类失败: {e}")))?
        .ok_or_else(|| {
            LmsError::not_found(format!("Category {} not found", assignment.category_id))
        })?;

    Ok(category.class_id)
}
