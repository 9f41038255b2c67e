use serde::Deserialize;

use crate::models::ClassKey;

// 创建作业分类请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(flatten)]
    pub class: ClassKey,
    pub category: String,
    pub catweight: u8,
}

// 创建作业请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    #[serde(flatten)]
    pub class: ClassKey,
    pub category: String,
    pub asgname: String,
    pub asgpoints: u16,
    pub asgdue: chrono::DateTime<chrono::Utc>,
    pub asgcontents: String,
}

// 存储层使用的作业参数
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub category_id: i64,
    pub name: String,
    pub max_points: u16,
    pub contents: String,
    pub due_at: chrono::DateTime<chrono::Utc>,
}
