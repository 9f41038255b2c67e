use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::{
    enrollments::requests::EnrollRequest, submissions::requests::SubmitAssignmentRequest,
};
use crate::services::StudentService;

// 懒加载的全局 STUDENT_SERVICE 实例
static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

// HTTP处理程序
pub async fn submit_assignment(
    req: HttpRequest,
    submission: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE
        .submit_assignment(&req, submission.into_inner())
        .await
}

pub async fn enroll(
    req: HttpRequest,
    enrollment: web::Json<EnrollRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.enroll(&req, enrollment.into_inner()).await
}

pub async fn get_gpa(req: HttpRequest, uid: web::Path<String>) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.get_gpa(&req, uid.into_inner()).await
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .service(web::resource("/submissions").route(web::post().to(submit_assignment)))
            .service(web::resource("/enrollments").route(web::post().to(enroll)))
            .service(web::resource("/{uid}/gpa").route(web::get().to(get_gpa))),
    );
}
