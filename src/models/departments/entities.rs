use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    // 院系代码，如 "CS"
    pub subject: String,
    // 院系名称
    pub name: String,
}
