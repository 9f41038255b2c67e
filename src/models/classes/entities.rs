use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    // 开课ID
    pub id: i64,
    // 课程ID
    pub course_id: i64,
    // 学期季节：Spring / Summer / Fall / Winter
    pub season: String,
    // 学年
    pub year: i32,
    // 上课地点
    pub location: String,
    // 上课开始时间
    pub start_time: NaiveTime,
    // 上课结束时间
    pub end_time: NaiveTime,
    // 授课教师 uid
    pub instructor_uid: String,
}
