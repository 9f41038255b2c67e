use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::ProfessorService;
use crate::errors::{LmsError, Result};
use crate::models::SuccessResponse;
use crate::models::assignments::requests::{CreateAssignmentRequest, NewAssignment};
use crate::services::{failure_response, lookup};
use crate::storage::Storage;
use crate::utils::validate::{validate_class_key, validate_name};

pub async fn create_assignment(
    service: &ProfessorService,
    request: &HttpRequest,
    assignment: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match create_and_regrade(&storage, assignment).await {
        Ok(regraded) => {
            info!(
                "Assignment created, {} enrolled student(s) regraded",
                regraded
            );
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Assignment creation", &e)),
    }
}

/// 作业插入与整门课的重算在同一事务内完成
async fn create_and_regrade(
    storage: &Arc<dyn Storage>,
    assignment: CreateAssignmentRequest,
) -> Result<usize> {
    validate_class_key(&assignment.class)
        .and(validate_name(&assignment.category))
        .and(validate_name(&assignment.asgname))
        .map_err(LmsError::validation)?;

    let category_id =
        lookup::resolve_category(storage, &assignment.class, &assignment.category).await?;

    let (_, grades) = storage
        .create_assignment(NewAssignment {
            category_id,
            name: assignment.asgname,
            max_points: assignment.asgpoints,
            contents: assignment.asgcontents,
            due_at: assignment.asgdue,
        })
        .await?;

    Ok(grades.len())
}
