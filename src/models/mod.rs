pub mod assignments;
pub mod classes;
pub mod common;
pub mod courses;
pub mod departments;
pub mod enrollments;
pub mod grading;
pub mod submissions;

pub use common::class_key::ClassKey;
pub use common::response::{GpaResponse, SuccessResponse};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
