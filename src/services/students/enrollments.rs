use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::StudentService;
use crate::errors::{LmsError, Result};
use crate::models::SuccessResponse;
use crate::models::enrollments::{entities::Enrollment, requests::EnrollRequest};
use crate::services::{failure_response, lookup};
use crate::storage::Storage;
use crate::utils::validate::{validate_class_key, validate_uid};

pub async fn enroll(
    service: &StudentService,
    request: &HttpRequest,
    enrollment: EnrollRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match enroll_in_class(&storage, &enrollment).await {
        Ok(created) => {
            info!(
                "Student {} enrolled in class {}",
                created.student_uid, enrollment.class
            );
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Enrollment", &e)),
    }
}

async fn enroll_in_class(
    storage: &Arc<dyn Storage>,
    enrollment: &EnrollRequest,
) -> Result<Enrollment> {
    validate_class_key(&enrollment.class)
        .and(validate_uid(&enrollment.uid))
        .map_err(LmsError::validation)?;

    let class_id = lookup::resolve_class(storage, &enrollment.class).await?;
    storage.enroll_student(class_id, &enrollment.uid).await
}
