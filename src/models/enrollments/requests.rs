use serde::Deserialize;

use crate::models::ClassKey;

// 学生选课请求
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollRequest {
    #[serde(flatten)]
    pub class: ClassKey,
    pub uid: String,
}
