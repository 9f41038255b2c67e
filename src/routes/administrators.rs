use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::{
    classes::requests::CreateClassRequest, courses::requests::CreateCourseRequest,
    departments::requests::CreateDepartmentRequest,
};
use crate::services::AdministratorService;

// 懒加载的全局 ADMINISTRATOR_SERVICE 实例
static ADMINISTRATOR_SERVICE: Lazy<AdministratorService> =
    Lazy::new(AdministratorService::new_lazy);

// HTTP处理程序
pub async fn create_department(
    req: HttpRequest,
    department: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATOR_SERVICE
        .create_department(&req, department.into_inner())
        .await
}

pub async fn create_course(
    req: HttpRequest,
    course: web::Json<CreateCourseRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATOR_SERVICE
        .create_course(&req, course.into_inner())
        .await
}

pub async fn create_class(
    req: HttpRequest,
    class: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    ADMINISTRATOR_SERVICE
        .create_class(&req, class.into_inner())
        .await
}

// 配置路由
pub fn configure_administrator_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/administrators")
            .service(web::resource("/departments").route(web::post().to(create_department)))
            .service(web::resource("/courses").route(web::post().to(create_course)))
            .service(web::resource("/classes").route(web::post().to(create_class))),
    );
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;

    use crate::routes::test_support::{test_app, test_storage};

    #[actix_web::test]
    async fn test_catalog_creation() {
        let app = test::init_service(test_app(test_storage().await)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/administrators/departments")
            .set_json(json!({"subject": "CS", "name": "Computer Science"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": true}));

        let req = test::TestRequest::post()
            .uri("/api/v1/administrators/departments")
            .set_json(json!({"subject": "CS", "name": "Again"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false}));

        let req = test::TestRequest::post()
            .uri("/api/v1/administrators/courses")
            .set_json(json!({"subject": "MATH", "number": 1210, "name": "Calculus"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/v1/administrators/courses")
            .set_json(json!({"subject": "CS", "number": 5530, "name": "Database Systems"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let class = json!({
            "subject": "CS",
            "number": 5530,
            "season": "Fall",
            "year": 2024,
            "start": "09:10",
            "end": "10:30",
            "location": "WEB L104",
            "instructor": "u0000100"
        });
        let req = test::TestRequest::post()
            .uri("/api/v1/administrators/classes")
            .set_json(&class)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/api/v1/administrators/classes")
            .set_json(&class)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_invalid_payloads_are_bad_requests() {
        let app = test::init_service(test_app(test_storage().await)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/administrators/departments")
            .set_json(json!({"subject": "TOOLONG", "name": "x"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/v1/administrators/courses")
            .set_json(json!({"subject": "CS"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"success": false}));
    }
}
