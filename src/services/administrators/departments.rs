use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::AdministratorService;
use crate::errors::LmsError;
use crate::models::SuccessResponse;
use crate::models::departments::requests::CreateDepartmentRequest;
use crate::services::failure_response;
use crate::utils::validate::{validate_name, validate_subject};

pub async fn create_department(
    service: &AdministratorService,
    request: &HttpRequest,
    department: CreateDepartmentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = validate_subject(&department.subject).and(validate_name(&department.name)) {
        return Ok(failure_response(
            "Department creation",
            &LmsError::validation(msg),
        ));
    }

    let storage = service.get_storage(request);

    match storage.create_department(department).await {
        Ok(department) => {
            info!(
                "Department {} ({}) created",
                department.subject, department.name
            );
            Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
        }
        Err(e) => Ok(failure_response("Department creation", &e)),
    }
}
