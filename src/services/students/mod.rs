pub mod enrollments;
pub mod gpa;
pub mod submissions;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    enrollments::requests::EnrollRequest, submissions::requests::SubmitAssignmentRequest,
};
use crate::storage::Storage;

pub struct StudentService {
    storage: Option<Arc<dyn Storage>>,
}

impl StudentService {
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

    // 提交作业文本
    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        submission: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submissions::submit_assignment(self, request, submission).await
    }

    // 选课
    pub async fn enroll(
        &self,
        request: &HttpRequest,
        enrollment: EnrollRequest,
    ) -> ActixResult<HttpResponse> {
        enrollments::enroll(self, request, enrollment).await
    }

    // 查询 GPA
    pub async fn get_gpa(&self, request: &HttpRequest, uid: String) -> ActixResult<HttpResponse> {
        gpa::get_gpa(self, request, uid).await
    }
}
