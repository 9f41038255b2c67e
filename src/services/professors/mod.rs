pub mod assignments;
pub mod categories;
pub mod grading;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    assignments::requests::{CreateAssignmentRequest, CreateCategoryRequest},
    grading::requests::RecomputeGradesRequest,
    submissions::requests::GradeSubmissionRequest,
};
use crate::storage::Storage;

pub struct ProfessorService {
    storage: Option<Arc<dyn Storage>>,
}

impl ProfessorService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 创建作业分类
    pub async fn create_category(
        &self,
        request: &HttpRequest,
        category: CreateCategoryRequest,
    ) -> ActixResult<HttpResponse> {
        categories::create_category(self, request, category).await
    }

    // 创建作业，并重算整门课的成绩
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        assignment: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        assignments::create_assignment(self, request, assignment).await
    }

    // 给提交评分，并重算该学生的成绩
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        grade: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grading::grade_submission(self, request, grade).await
    }

    // 手动重算整门课的成绩
    pub async fn recompute_grades(
        &self,
        request: &HttpRequest,
        recompute: RecomputeGradesRequest,
    ) -> ActixResult<HttpResponse> {
        grading::recompute_grades(self, request, recompute).await
    }
}
