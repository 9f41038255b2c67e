use serde::{Deserialize, Serialize};

// 写操作统一返回 {"success": bool}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }

    pub fn failed() -> Self {
        Self { success: false }
    }
}

// GPA 查询结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GpaResponse {
    pub gpa: f64,
}
