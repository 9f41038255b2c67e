use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    // 课程ID
    pub id: i64,
    // 所属院系代码
    pub subject: String,
    // 课程编号 (0..=9999)
    pub number: i32,
    // 课程名称
    pub name: String,
}
