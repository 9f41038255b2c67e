use serde::{Deserialize, Serialize};

// 提交记录，以 (作业, 学生) 唯一确定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub assignment_id: i64,
    pub student_uid: String,
    // 得分，未评分时为 None
    pub score: Option<u16>,
    pub contents: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
