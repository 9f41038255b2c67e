use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AdministratorService;
use crate::errors::LmsError;
use crate::models::SuccessResponse;
use crate::models::courses::requests::CreateCourseRequest;
use crate::services::failure_response;
use crate::utils::validate::{validate_course_number, validate_name, validate_subject};

pub async fn create_course(
    service: &AdministratorService,
    request: &HttpRequest,
    course: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    let valid = validate_subject(&course.subject)
        .and(validate_course_number(course.number))
        .and(validate_name(&course.name));
    if let Err(msg) = valid {
        return Ok(failure_response("Course creation", &LmsError::validation(msg)));
    }

    let storage = service.get_storage(request);

    match storage.create_course(course).await {
        Ok(course) => {
            info!("Course {} {} created", course.subject, course.number);
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Course creation", &e)),
    }
}
