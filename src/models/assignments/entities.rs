use serde::{Deserialize, Serialize};

// 作业分类（如 "Homework"、"Exam"）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentCategory {
    pub id: i64,
    pub class_id: i64,
    pub name: String,
    // 权重（百分点），各分类之和不要求为 100
    pub weight: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    // 满分
    pub max_points: u16,
    pub contents: String,
    // 截止时间
    pub due_at: chrono::DateTime<chrono::Utc>,
}
