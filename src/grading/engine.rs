use std::collections::HashMap;

use super::LetterGrade;
use crate::models::assignments::entities::{Assignment, AssignmentCategory};

/// 按 (作业, 学生) 查询得分，没有提交时返回 `None`（按 0 分计）
pub trait ScoreLookup {
    fn score(&self, assignment_id: i64, student_uid: &str) -> Option<u16>;
}

impl<F> ScoreLookup for F
where
    F: Fn(i64, &str) -> Option<u16>,
{
    fn score(&self, assignment_id: i64, student_uid: &str) -> Option<u16> {
        self(assignment_id, student_uid)
    }
}

/// 成绩计算引擎
pub struct GradeEngine;

impl GradeEngine {
    /// 计算加权总百分比
    ///
    /// 没有作业或满分合计为 0 的分类不计入权重；
    /// 参与计算的权重合计为 0 时返回 `None`。
    pub fn final_percent(
        categories: &[AssignmentCategory],
        assignments_by_category: &HashMap<i64, Vec<Assignment>>,
        scores: &impl ScoreLookup,
        student_uid: &str,
    ) -> Option<f64> {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for category in categories {
            let Some(assignments) = assignments_by_category.get(&category.id) else {
                continue;
            };

            let max_points: u64 = assignments.iter().map(|a| u64::from(a.max_points)).sum();
            if max_points == 0 {
                continue;
            }

            let earned: u64 = assignments
                .iter()
                .map(|a| u64::from(scores.score(a.id, student_uid).unwrap_or(0)))
                .sum();

            let weight = f64::from(category.weight);
            weighted_sum += weight * earned as f64 / max_points as f64;
            total_weight += weight;
        }

        if total_weight == 0.0 {
            return None;
        }

        let percent = weighted_sum * 100.0 / total_weight;
        (!percent.is_nan()).then_some(percent)
    }

    /// 计算某个学生在一门课中的字母成绩
    pub fn compute_letter_grade(
        categories: &[AssignmentCategory],
        assignments_by_category: &HashMap<i64, Vec<Assignment>>,
        scores: &impl ScoreLookup,
        student_uid: &str,
    ) -> LetterGrade {
        Self::final_percent(categories, assignments_by_category, scores, student_uid)
            .map_or(LetterGrade::Ungraded, LetterGrade::from_percent)
    }

    /// 根据字母成绩列表计算 GPA
    ///
    /// `"--"` 不计入；无法识别的字符串按 0 绩点计入。没有可计入的成绩时为 0.0。
    pub fn compute_gpa<I, S>(letter_grades: I) -> f64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (total, count) = letter_grades
            .into_iter()
            .filter_map(|grade| match grade.as_ref().parse::<LetterGrade>() {
                Ok(LetterGrade::Ungraded) => None,
                Ok(letter) => Some(letter.grade_points()),
                Err(_) => Some(0.0),
            })
            .fold((0.0, 0usize), |(total, count), points| {
                (total + points, count + 1)
            });

        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}
