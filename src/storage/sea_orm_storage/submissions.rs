//! 提交存储操作

use super::assignments::class_id_of_assignment;
use super::{SeaOrmStorage, db_error, grading};
use crate::entity::submissions::{ActiveModel, Entity as Submissions};
use crate::errors::{LmsError, Result};
use crate::models::grading::entities::StudentGrade;
use crate::models::submissions::entities::Submission;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, Set};

impl SeaOrmStorage {
    /// 提交作业文本
    ///
    /// 首次提交得分记为 0；重新提交只替换内容和时间，保留已有得分。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_uid: &str,
        contents: String,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();
        let txn = self.begin_write().await?;

        let existing = Submissions::find_by_id((assignment_id, student_uid.to_string()))
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;

        let result = match existing {
            Some(model) => {
                let mut active = model.into_active_model();
                active.contents = Set(Some(contents));
                active.submitted_at = Set(now);
                active.update(&txn).await.map_err(db_error("更新提交失败"))?
            }
            None => {
                let model = ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_uid: Set(student_uid.to_string()),
                    score: Set(Some(0)),
                    contents: Set(Some(contents)),
                    submitted_at: Set(now),
                };
                model.insert(&txn).await.map_err(db_error("创建提交失败"))?
            }
        };

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_submission())
    }

    /// 评分并重算该学生的成绩
    ///
    /// 得分与字母成绩在同一写事务内写入。学生尚未提交时返回 None；
    /// 学生未选课时得分照常保存，成绩为 None。
    pub async fn grade_submission_impl(
        &self,
        assignment_id: i64,
        student_uid: &str,
        score: u16,
    ) -> Result<Option<(Submission, Option<StudentGrade>)>> {
        let txn = self.begin_write().await?;

        let existing = Submissions::find_by_id((assignment_id, student_uid.to_string()))
            .one(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?;

        let Some(model) = existing else {
            txn.rollback()
                .await
                .map_err(|e| LmsError::database_operation(format!("回滚事务失败: {e}")))?;
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.score = Set(Some(i32::from(score)));
        let submission = active
            .update(&txn)
            .await
            .map_err(|e| LmsError::database_operation(format!("更新得分失败: {e}")))?
            .into_submission();

        let class_id = class_id_of_assignment(&txn, assignment_id).await?;
        let grade = grading::recompute_student(&txn, class_id, student_uid).await?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some((submission, grade)))
    }
}
