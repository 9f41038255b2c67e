use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::grading::{GradeEngine, LetterGrade, ScoreLookup};
use crate::models::assignments::entities::{Assignment, AssignmentCategory};

/// 一门课的成绩快照
///
/// 由存储层在同一事务内读取，交给 [`GradeEngine`] 计算。
#[derive(Debug, Clone, Default)]
pub struct ClassGradebook {
    pub class_id: i64,
    pub categories: Vec<AssignmentCategory>,
    pub assignments_by_category: HashMap<i64, Vec<Assignment>>,
    // assignment_id -> (student_uid -> score)
    pub scores: HashMap<i64, HashMap<String, u16>>,
}

impl ClassGradebook {
    pub fn letter_grade_for(&self, student_uid: &str) -> LetterGrade {
        GradeEngine::compute_letter_grade(
            &self.categories,
            &self.assignments_by_category,
            self,
            student_uid,
        )
    }
}

impl ScoreLookup for ClassGradebook {
    fn score(&self, assignment_id: i64, student_uid: &str) -> Option<u16> {
        self.scores
            .get(&assignment_id)
            .and_then(|by_student| by_student.get(student_uid))
            .copied()
    }
}

// 重算结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentGrade {
    pub student_uid: String,
    pub letter_grade: LetterGrade,
}
