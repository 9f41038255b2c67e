//! 成绩计算核心
//!
//! 纯函数、无状态：输入分类、作业与得分，输出字母成绩或 GPA。
//! 读写数据库由 storage 层负责，这里不做任何 IO。

mod engine;
mod letter_grade;

pub use engine::{GradeEngine, ScoreLookup};
pub use letter_grade::LetterGrade;
