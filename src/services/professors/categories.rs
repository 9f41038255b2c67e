use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::ProfessorService;
use crate::errors::{LmsError, Result};
use crate::models::SuccessResponse;
use crate::models::assignments::{entities::AssignmentCategory, requests::CreateCategoryRequest};
use crate::services::{failure_response, lookup};
use crate::storage::Storage;
use crate::utils::validate::{validate_class_key, validate_name};

pub async fn create_category(
    service: &ProfessorService,
    request: &HttpRequest,
    category: CreateCategoryRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create(&storage, &category).await {
        Ok(created) => {
            info!(
                "Category {} (weight {}) created in class {}",
                created.name, created.weight, category.class
            );
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Category creation", &e)),
    }
}

async fn create(
    storage: &Arc<dyn Storage>,
    category: &CreateCategoryRequest,
) -> Result<AssignmentCategory> {
    validate_class_key(&category.class)
        .and(validate_name(&category.category))
        .map_err(LmsError::validation)?;

    let class_id = lookup::resolve_class(storage, &category.class).await?;
    storage
        .create_category(class_id, &category.category, category.catweight)
        .await
}
