pub mod administrators;
pub mod lookup;
pub mod professors;
pub mod students;

pub use administrators::AdministratorService;
pub use professors::ProfessorService;
pub use students::StudentService;

use actix_web::HttpResponse;
use tracing::{error, warn};

use crate::errors::LmsError;
use crate::models::SuccessResponse;

/// 将业务错误映射为 HTTP 状态码和 `{"success": false}`
pub(crate) fn failure_response(operation: &str, err: &LmsError) -> HttpResponse {
    if err.is_client_error() {
        warn!("{} rejected: {}", operation, err);
    } else {
        error!("{} failed: {}", operation, err);
    }

    let mut builder = match err {
        LmsError::Validation(_) | LmsError::DateParse(_) => HttpResponse::BadRequest(),
        LmsError::NotFound(_) => HttpResponse::NotFound(),
        LmsError::Conflict(_) => HttpResponse::Conflict(),
        _ => HttpResponse::InternalServerError(),
    };
    builder.json(SuccessResponse::failed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_failure_status_codes() {
        let cases = [
            (LmsError::validation("bad"), StatusCode::BAD_REQUEST),
            (LmsError::date_parse("bad"), StatusCode::BAD_REQUEST),
            (LmsError::not_found("missing"), StatusCode::NOT_FOUND),
            (LmsError::conflict("dup"), StatusCode::CONFLICT),
            (
                LmsError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(failure_response("test", &err).status(), status);
        }
    }
}
