use serde::Deserialize;

// 创建院系请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartmentRequest {
    pub subject: String,
    pub name: String,
}
