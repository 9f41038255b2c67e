use chrono::NaiveTime;
use serde::Deserialize;

// 创建开课请求（HTTP）
//
// `start` / `end` 为当天时间，格式 `HH:MM` 或 `HH:MM:SS`。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub subject: String,
    pub number: i32,
    pub season: String,
    pub year: i32,
    pub start: String,
    pub end: String,
    pub location: String,
    pub instructor: String,
}

// 存储层使用的开课参数，时间已解析
#[derive(Debug, Clone)]
pub struct NewClass {
    pub subject: String,
    pub number: i32,
    pub season: String,
    pub year: i32,
    pub location: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub instructor_uid: String,
}
