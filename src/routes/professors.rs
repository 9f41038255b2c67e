use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::{
    assignments::requests::{CreateAssignmentRequest, CreateCategoryRequest},
    grading::requests::RecomputeGradesRequest,
    submissions::requests::GradeSubmissionRequest,
};
use crate::services::ProfessorService;

// 懒加载的全局 PROFESSOR_SERVICE 实例
static PROFESSOR_SERVICE: Lazy<ProfessorService> = Lazy::new(ProfessorService::new_lazy);

// HTTP处理程序
pub async fn create_category(
    req: HttpRequest,
    category: web::Json<CreateCategoryRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .create_category(&req, category.into_inner())
        .await
}

pub async fn create_assignment(
    req: HttpRequest,
    assignment: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .create_assignment(&req, assignment.into_inner())
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    grade: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .grade_submission(&req, grade.into_inner())
        .await
}

pub async fn recompute_grades(
    req: HttpRequest,
    recompute: web::Json<RecomputeGradesRequest>,
) -> ActixResult<HttpResponse> {
    PROFESSOR_SERVICE
        .recompute_grades(&req, recompute.into_inner())
        .await
}

// 配置路由
pub fn configure_professor_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/professors")
            .service(web::resource("/categories").route(web::post().to(create_category)))
            .service(web::resource("/assignments").route(web::post().to(create_assignment)))
            .service(web::resource("/submissions/score").route(web::put().to(grade_submission)))
            .service(web::resource("/grades/recompute").route(web::post().to(recompute_grades))),
    );
}
