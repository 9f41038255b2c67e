use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::StudentService;
use crate::errors::{LmsError, Result};
use crate::models::SuccessResponse;
use crate::models::submissions::{entities::Submission, requests::SubmitAssignmentRequest};
use crate::services::{failure_response, lookup};
use crate::storage::Storage;
use crate::utils::validate::{validate_class_key, validate_name, validate_uid};

pub async fn submit_assignment(
    service: &StudentService,
    request: &HttpRequest,
    submission: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match submit(&storage, submission).await {
        Ok(saved) => {
            info!(
                "Submission for assignment {} saved by {}",
                saved.assignment_id, saved.student_uid
            );
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Assignment submission", &e)),
    }
}

// 提交不改变得分，不触发成绩重算
async fn submit(
    storage: &Arc<dyn Storage>,
    submission: SubmitAssignmentRequest,
) -> Result<Submission> {
    validate_class_key(&submission.class)
        .and(validate_name(&submission.category))
        .and(validate_name(&submission.asgname))
        .and(validate_uid(&submission.uid))
        .map_err(LmsError::validation)?;

    let assignment_id = lookup::resolve_assignment(
        storage,
        &submission.class,
        &submission.category,
        &submission.asgname,
    )
    .await?;

    storage
        .upsert_submission(assignment_id, &submission.uid, submission.contents)
        .await
}
