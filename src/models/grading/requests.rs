use serde::Deserialize;

use crate::models::ClassKey;

// 手动触发整门课的成绩重算
#[derive(Debug, Clone, Deserialize)]
pub struct RecomputeGradesRequest {
    #[serde(flatten)]
    pub class: ClassKey,
}
