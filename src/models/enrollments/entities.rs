use serde::{Deserialize, Serialize};

use crate::grading::LetterGrade;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub class_id: i64,
    pub student_uid: String,
    // 选课时为 "--"，只由成绩重算修改
    pub letter_grade: LetterGrade,
}
