use std::sync::Arc;

use crate::models::{
    ClassKey,
    assignments::{
        entities::{Assignment, AssignmentCategory},
        requests::NewAssignment,
    },
    classes::{entities::Class, requests::NewClass},
    courses::{entities::Course, requests::CreateCourseRequest},
    departments::{entities::Department, requests::CreateDepartmentRequest},
    enrollments::entities::Enrollment,
    grading::entities::StudentGrade,
    submissions::entities::Submission,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 院系、课程与开课
    // 创建院系，院系代码已存在时返回 Conflict
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department>;
    // 创建课程，院系不存在返回 NotFound，(院系, 编号) 重复返回 Conflict
    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course>;
    // 创建开课，检查同学期重复开课和同地点时间冲突
    async fn create_class(&self, class: NewClass) -> Result<Class>;
    // 通过业务键查找开课ID
    async fn find_class_id(&self, key: &ClassKey) -> Result<Option<i64>>;

    /// 作业分类与作业
    // 创建作业分类，同一门课内名称重复返回 Conflict
    async fn create_category(
        &self,
        class_id: i64,
        name: &str,
        weight: u8,
    ) -> Result<AssignmentCategory>;
    // 通过名称查找作业分类ID
    async fn find_category_id(&self, class_id: i64, name: &str) -> Result<Option<i64>>;
    // 创建作业并在同一事务内重算整门课的成绩，分类不存在返回 NotFound
    async fn create_assignment(
        &self,
        assignment: NewAssignment,
    ) -> Result<(Assignment, Vec<StudentGrade>)>;
    // 通过名称查找作业ID
    async fn find_assignment_id(&self, category_id: i64, name: &str) -> Result<Option<i64>>;

    /// 提交
    // 提交或重新提交作业文本；重新提交保留原得分
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_uid: &str,
        contents: String,
    ) -> Result<Submission>;
    // 评分并在同一事务内重算该学生的成绩；学生尚未提交时返回 None，未选课时成绩为 None
    async fn grade_submission(
        &self,
        assignment_id: i64,
        student_uid: &str,
        score: u16,
    ) -> Result<Option<(Submission, Option<StudentGrade>)>>;

    /// 选课与成绩
    // 选课，重复选课返回 Conflict
    async fn enroll_student(&self, class_id: i64, student_uid: &str) -> Result<Enrollment>;
    // 列出学生所有选课的字母成绩
    async fn list_student_letter_grades(&self, student_uid: &str) -> Result<Vec<String>>;

    /// 成绩重算
    // 在一个事务内重算整门课所有学生的成绩
    async fn recompute_class_grades(&self, class_id: i64) -> Result<Vec<StudentGrade>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
