//! 由业务键解析数据库ID，找不到时统一返回 NotFound

use std::sync::Arc;

use crate::errors::{LmsError, Result};
use crate::models::ClassKey;
use crate::storage::Storage;

pub(crate) async fn resolve_class(storage: &Arc<dyn Storage>, key: &ClassKey) -> Result<i64> {
    storage
        .find_class_id(key)
        .await?
        .ok_or_else(|| LmsError::not_found(format!("Class {key} not found")))
}

pub(crate) async fn resolve_category(
    storage: &Arc<dyn Storage>,
    key: &ClassKey,
    category: &str,
) -> Result<i64> {
    let class_id = resolve_class(storage, key).await?;
    storage
        .find_category_id(class_id, category)
        .await?
        .ok_or_else(|| {
            LmsError::not_found(format!("Category {category} not found in class {key}"))
        })
}

pub(crate) async fn resolve_assignment(
    storage: &Arc<dyn Storage>,
    key: &ClassKey,
    category: &str,
    assignment: &str,
) -> Result<i64> {
    let category_id = resolve_category(storage, key, category).await?;
    storage
        .find_assignment_id(category_id, assignment)
        .await?
        .ok_or_else(|| {
            LmsError::not_found(format!(
                "Assignment {assignment} not found in {category} of class {key}"
            ))
        })
}
