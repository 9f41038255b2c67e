use serde::Deserialize;

// 创建课程请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCourseRequest {
    pub subject: String,
    pub number: i32,
    pub name: String,
}
