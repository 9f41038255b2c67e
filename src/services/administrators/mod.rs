pub mod classes;
pub mod courses;
pub mod departments;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    classes::requests::CreateClassRequest, courses::requests::CreateCourseRequest,
    departments::requests::CreateDepartmentRequest,
};
use crate::storage::Storage;

pub struct AdministratorService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdministratorService {
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

    // 创建院系
    pub async fn create_department(
        &self,
        request: &HttpRequest,
        department: CreateDepartmentRequest,
    ) -> ActixResult<HttpResponse> {
        departments::create_department(self, request, department).await
    }

    // 创建课程
    pub async fn create_course(
        &self,
        request: &HttpRequest,
        course: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        courses::create_course(self, request, course).await
    }

    // 创建开课
    pub async fn create_class(
        &self,
        request: &HttpRequest,
        class: CreateClassRequest,
    ) -> ActixResult<HttpResponse> {
        classes::create_class(self, request, class).await
    }
}
