use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use super::StudentService;
use crate::errors::LmsError;
use crate::grading::GradeEngine;
use crate::models::GpaResponse;
use crate::services::failure_response;
use crate::utils::validate::validate_uid;

pub async fn get_gpa(
    service: &StudentService,
    request: &HttpRequest,
    uid: String,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_uid(&uid) {
        return Ok(failure_response("GPA lookup", &LmsError::validation(msg)));
    }

    let storage = service.get_storage(request);

    match storage.list_student_letter_grades(&uid).await {
        Ok(grades) => {
            let gpa = GradeEngine::compute_gpa(&grades);
            debug!("GPA of {} over {} enrollment(s): {}", uid, grades.len(), gpa);
            Ok(HttpResponse::Ok().json(GpaResponse { gpa }))
        }
        Err(e) => Ok(failure_response("GPA lookup", &e)),
    }
}
