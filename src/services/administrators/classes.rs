use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AdministratorService;
use crate::errors::{LmsError, Result};
use crate::models::SuccessResponse;
use crate::models::classes::requests::{CreateClassRequest, NewClass};
use crate::services::failure_response;
use crate::utils::validate::{
    parse_time_of_day, validate_course_number, validate_name, validate_season, validate_subject,
    validate_uid, validate_year,
};

pub async fn create_class(
    service: &AdministratorService,
    request: &HttpRequest,
    class: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let new_class = match prepare_class(class) {
        Ok(new_class) => new_class,
        Err(e) => return Ok(failure_response("Class creation", &e)),
    };

    let storage = service.get_storage(request);

    match storage.create_class(new_class).await {
        Ok(class) => {
            info!(
                "Class {} created for course {} in {} {}",
                class.id, class.course_id, class.season, class.year
            );
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Class creation", &e)),
    }
}

/// 校验请求并解析上课时间
fn prepare_class(class: CreateClassRequest) -> Result<NewClass> {
    validate_subject(&class.subject)
        .and(validate_course_number(class.number))
        .and(validate_season(&class.season))
        .and(validate_year(class.year))
        .and(validate_name(&class.location))
        .and(validate_uid(&class.instructor))
        .map_err(LmsError::validation)?;

    let start_time = parse_time_of_day(&class.start)?;
    let end_time = parse_time_of_day(&class.end)?;
    if start_time >= end_time {
        return Err(LmsError::validation(
            "Class start time must be before end time",
        ));
    }

    Ok(NewClass {
        subject: class.subject,
        number: class.number,
        season: class.season,
        year: class.year,
        location: class.location,
        start_time,
        end_time,
        instructor_uid: class.instructor,
    })
}
