use serde::Deserialize;

use crate::models::ClassKey;

// 学生提交作业文本
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAssignmentRequest {
    #[serde(flatten)]
    pub class: ClassKey,
    pub category: String,
    pub asgname: String,
    pub uid: String,
    pub contents: String,
}

// 教师给提交评分
#[derive(Debug, Clone, Deserialize)]
pub struct GradeSubmissionRequest {
    #[serde(flatten)]
    pub class: ClassKey,
    pub category: String,
    pub asgname: String,
    pub uid: String,
    pub score: u16,
}
