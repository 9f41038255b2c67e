use std::fmt;

use serde::{Deserialize, Serialize};

// 开课的业务键：课程号 + 学期
//
// 各请求通过 `#[serde(flatten)]` 内嵌，对应 JSON 中的
// `subject`、`num`、`season`、`year` 四个字段。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassKey {
    pub subject: String,
    pub num: i32,
    pub season: String,
    pub year: i32,
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.subject, self.num, self.season, self.year)
    }
}
