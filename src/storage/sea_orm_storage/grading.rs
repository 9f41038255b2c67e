//! 成绩快照读取与事务内重算
//!
//! 重算函数只接收连接，由调用方在写事务（`SeaOrmStorage::begin_write`）内调用，
//! 使触发重算的写入与成绩写回一同提交或回滚。相关选课行先加行锁
//! （SQLite 不支持行锁，由 `BEGIN IMMEDIATE` 的写锁串行化）。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignment_categories::{
    Column as CategoryColumn, Entity as AssignmentCategories,
};
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{LmsError, Result};
use crate::grading::LetterGrade;
use crate::models::grading::entities::{ClassGradebook, StudentGrade};
use sea_orm::sea_query::{Expr, LockType};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use tracing::debug;

/// 读取一门课的成绩快照，只加载给定学生的提交
pub(super) async fn load_gradebook<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    students: &[String],
) -> Result<ClassGradebook> {
    let categories = AssignmentCategories::find()
        .filter(CategoryColumn::ClassId.eq(class_id))
        .order_by_asc(CategoryColumn::Id)
        .all(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("查询作业分类失败: {e}")))?;

    let category_ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
    let assignments = if category_ids.is_empty() {
        Vec::new()
    } else {
        Assignments::find()
            .filter(AssignmentColumn::CategoryId.is_in(category_ids))
            .order_by_asc(AssignmentColumn::Id)
            .all(conn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询作业失败: {e}")))?
    };

    let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();
    let submissions = if assignment_ids.is_empty() || students.is_empty() {
        Vec::new()
    } else {
        Submissions::find()
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
            .filter(SubmissionColumn::StudentUid.is_in(students.iter().cloned()))
            .all(conn)
            .await
            .map_err(|e| LmsError::database_operation(format!("查询提交失败: {e}")))?
    };

    let mut assignments_by_category: HashMap<i64, Vec<_>> = HashMap::new();
    for assignment in assignments {
        assignments_by_category
            .entry(assignment.category_id)
            .or_default()
            .push(assignment.into_assignment());
    }

    let mut scores: HashMap<i64, HashMap<String, u16>> = HashMap::new();
    for submission in submissions {
        if let Some(score) = submission.score.and_then(|s| u16::try_from(s).ok()) {
            scores
                .entry(submission.assignment_id)
                .or_default()
                .insert(submission.student_uid, score);
        }
    }

    Ok(ClassGradebook {
        class_id,
        categories: categories.into_iter().map(|c| c.into_category()).collect(),
        assignments_by_category,
        scores,
    })
}

/// 覆盖写入某个选课的字母成绩，返回是否命中选课记录
pub(super) async fn write_letter_grade<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    student_uid: &str,
    letter_grade: LetterGrade,
) -> Result<bool> {
    let result = Enrollments::update_many()
        .col_expr(
            EnrollmentColumn::LetterGrade,
            Expr::value(letter_grade.as_str()),
        )
        .filter(EnrollmentColumn::ClassId.eq(class_id))
        .filter(EnrollmentColumn::StudentUid.eq(student_uid))
        .exec(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("更新成绩失败: {e}")))?;

    Ok(result.rows_affected > 0)
}

/// 重算整门课的成绩
pub(super) async fn recompute_class<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
) -> Result<Vec<StudentGrade>> {
    let enrollments = Enrollments::find()
        .filter(EnrollmentColumn::ClassId.eq(class_id))
        .order_by_asc(EnrollmentColumn::Id)
        .lock(LockType::Update)
        .all(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("查询选课失败: {e}")))?;

    let students: Vec<String> = enrollments.iter().map(|e| e.student_uid.clone()).collect();
    let gradebook = load_gradebook(conn, class_id, &students).await?;

    let mut grades = Vec::with_capacity(enrollments.len());
    for enrollment in enrollments {
        let letter_grade = gradebook.letter_grade_for(&enrollment.student_uid);
        if enrollment.letter_grade != letter_grade.as_str() {
            write_letter_grade(conn, class_id, &enrollment.student_uid, letter_grade).await?;
        }
        grades.push(StudentGrade {
            student_uid: enrollment.student_uid,
            letter_grade,
        });
    }

    debug!(
        "Recomputed letter grades for {} student(s) in class {}",
        grades.len(),
        class_id
    );

    Ok(grades)
}

/// 重算单个学生的成绩，未选课时返回 None
pub(super) async fn recompute_student<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    student_uid: &str,
) -> Result<Option<StudentGrade>> {
    let enrollment = Enrollments::find()
        .filter(EnrollmentColumn::ClassId.eq(class_id))
        .filter(EnrollmentColumn::StudentUid.eq(student_uid))
        .lock(LockType::Update)
        .one(conn)
        .await
        .map_err(|e| LmsError::database_operation(format!("查询选课失败: {e}")))?;

    let Some(enrollment) = enrollment else {
        return Ok(None);
    };

    let gradebook =
        load_gradebook(conn, class_id, std::slice::from_ref(&enrollment.student_uid)).await?;
    let letter_grade = gradebook.letter_grade_for(&enrollment.student_uid);

    if enrollment.letter_grade != letter_grade.as_str() {
        write_letter_grade(conn, class_id, student_uid, letter_grade).await?;
    }

    debug!(
        "Recomputed letter grade {} for {} in class {}",
        letter_grade, student_uid, class_id
    );

    Ok(Some(StudentGrade {
        student_uid: enrollment.student_uid,
        letter_grade,
    }))
}

impl SeaOrmStorage {
    /// 显式重算整门课的成绩
    pub async fn recompute_class_grades_impl(&self, class_id: i64) -> Result<Vec<StudentGrade>> {
        let txn = self.begin_write().await?;
        let grades = recompute_class(&txn, class_id).await?;

        txn.commit()
            .await
            .map_err(|e| LmsError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(grades)
    }
}

#[cfg(test)]
mod tests {
    use super::{load_gradebook, write_letter_grade};
    use crate::config::DatabaseConfig;
    use crate::grading::LetterGrade;
    use crate::models::assignments::requests::NewAssignment;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::storage::sea_orm_storage::test_support::{memory_storage, seed_class};
    use sea_orm::ConnectionTrait;

    struct Fixture {
        storage: SeaOrmStorage,
        class_id: i64,
        homework: i64,
        exam: i64,
    }

    // Homework 40% / Exam 60%，各一份满分 100 的作业，两名学生已选课
    async fn fixture() -> Fixture {
        let storage = memory_storage().await;
        let class_id = seed_class(&storage).await;

        let homework_cat = storage
            .create_category(class_id, "Homework", 40)
            .await
            .unwrap();
        let exam_cat = storage.create_category(class_id, "Exam", 60).await.unwrap();

        storage.enroll_student(class_id, "u0000001").await.unwrap();
        storage.enroll_student(class_id, "u0000002").await.unwrap();

        let (homework, _) = storage
            .create_assignment(new_assignment(homework_cat.id, "HW1", 100))
            .await
            .unwrap();
        let (exam, _) = storage
            .create_assignment(new_assignment(exam_cat.id, "Midterm", 100))
            .await
            .unwrap();

        Fixture {
            storage,
            class_id,
            homework: homework.id,
            exam: exam.id,
        }
    }

    fn new_assignment(category_id: i64, name: &str, max_points: u16) -> NewAssignment {
        NewAssignment {
            category_id,
            name: name.to_string(),
            max_points,
            contents: "Answer every question.".to_string(),
            due_at: chrono::Utc::now(),
        }
    }

    async fn letters(storage: &SeaOrmStorage, uid: &str) -> Vec<String> {
        storage.list_student_letter_grades(uid).await.unwrap()
    }

    async fn submit_and_grade(storage: &SeaOrmStorage, assignment_id: i64, uid: &str, score: u16) {
        storage
            .upsert_submission(assignment_id, uid, "answer".into())
            .await
            .unwrap();
        storage
            .grade_submission(assignment_id, uid, score)
            .await
            .unwrap()
            .unwrap();
    }

    // 选课成绩一旦被改写即中止语句，用来模拟重算阶段的数据库故障
    async fn freeze_letter_grades(storage: &SeaOrmStorage) {
        storage
            .db
            .execute_unprepared(
                "CREATE TRIGGER freeze_letter_grades BEFORE UPDATE OF letter_grade ON enrollments \
                 BEGIN SELECT RAISE(ABORT, 'letter grades are frozen'); END;",
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_creating_assignment_regrades_class() {
        let storage = memory_storage().await;
        let class_id = seed_class(&storage).await;
        let category = storage
            .create_category(class_id, "Homework", 100)
            .await
            .unwrap();
        storage.enroll_student(class_id, "u0000001").await.unwrap();
        assert_eq!(letters(&storage, "u0000001").await, vec!["--".to_string()]);

        let (assignment, grades) = storage
            .create_assignment(new_assignment(category.id, "HW1", 100))
            .await
            .unwrap();
        assert_eq!(assignment.name, "HW1");
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].letter_grade, LetterGrade::E);
        assert_eq!(letters(&storage, "u0000001").await, vec!["E".to_string()]);
    }

    #[tokio::test]
    async fn test_recompute_class_grades() {
        let f = fixture().await;
        let s = &f.storage;

        submit_and_grade(s, f.homework, "u0000001", 80).await;
        submit_and_grade(s, f.exam, "u0000001", 90).await;

        let grades = s.recompute_class_grades(f.class_id).await.unwrap();
        assert_eq!(grades.len(), 2);
        assert_eq!(grades[0].student_uid, "u0000001");
        assert_eq!(grades[0].letter_grade, LetterGrade::B);
        // 没有任何提交的学生得 0%
        assert_eq!(grades[1].letter_grade, LetterGrade::E);

        assert_eq!(letters(s, "u0000001").await, vec!["B".to_string()]);
        assert_eq!(letters(s, "u0000002").await, vec!["E".to_string()]);
    }

    #[tokio::test]
    async fn test_recompute_is_idempotent() {
        let f = fixture().await;
        let s = &f.storage;

        submit_and_grade(s, f.homework, "u0000002", 100).await;

        let first = s.recompute_class_grades(f.class_id).await.unwrap();
        let second = s.recompute_class_grades(f.class_id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(letters(s, "u0000002").await, vec!["E".to_string()]);
    }

    #[tokio::test]
    async fn test_grading_regrades_one_student() {
        let f = fixture().await;
        let s = &f.storage;

        s.upsert_submission(f.homework, "u0000001", "hw".into())
            .await
            .unwrap();
        s.upsert_submission(f.exam, "u0000001", "exam".into())
            .await
            .unwrap();
        s.grade_submission(f.homework, "u0000001", 100)
            .await
            .unwrap();
        let (submission, grade) = s
            .grade_submission(f.exam, "u0000001", 100)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(submission.score, Some(100));
        assert_eq!(grade.unwrap().letter_grade, LetterGrade::A);
        assert_eq!(letters(s, "u0000001").await, vec!["A".to_string()]);
        assert_eq!(letters(s, "u0000002").await, vec!["E".to_string()]);
    }

    #[tokio::test]
    async fn test_grading_student_not_enrolled_keeps_score() {
        let f = fixture().await;
        let s = &f.storage;

        s.upsert_submission(f.exam, "u0000009", "exam".into())
            .await
            .unwrap();
        let (submission, grade) = s
            .grade_submission(f.exam, "u0000009", 70)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(submission.score, Some(70));
        assert!(grade.is_none());
        assert!(letters(s, "u0000009").await.is_empty());
    }

    #[tokio::test]
    async fn test_load_gradebook_only_enrolled_students() {
        let f = fixture().await;
        let s = &f.storage;

        submit_and_grade(s, f.exam, "u0000002", 45).await;
        s.upsert_submission(f.exam, "u0000003", "exam".into())
            .await
            .unwrap();

        let students = vec!["u0000001".to_string(), "u0000002".to_string()];
        let gradebook = load_gradebook(&s.db, f.class_id, &students).await.unwrap();
        assert_eq!(gradebook.class_id, f.class_id);
        assert_eq!(gradebook.categories.len(), 2);
        assert_eq!(gradebook.assignments_by_category.len(), 2);
        assert_eq!(gradebook.scores[&f.exam].get("u0000002"), Some(&45));
        assert!(!gradebook.scores[&f.exam].contains_key("u0000003"));
    }

    #[tokio::test]
    async fn test_write_letter_grade() {
        let f = fixture().await;
        let s = &f.storage;

        assert!(
            write_letter_grade(&s.db, f.class_id, "u0000001", LetterGrade::BMinus)
                .await
                .unwrap()
        );
        assert_eq!(letters(s, "u0000001").await, vec!["B-".to_string()]);
        assert!(
            !write_letter_grade(&s.db, f.class_id, "u0000009", LetterGrade::A)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_class_without_assignments_stays_ungraded() {
        let storage = memory_storage().await;
        let class_id = seed_class(&storage).await;
        storage.create_category(class_id, "Quiz", 10).await.unwrap();
        storage.enroll_student(class_id, "u0000001").await.unwrap();

        let grades = storage.recompute_class_grades(class_id).await.unwrap();
        assert_eq!(grades[0].letter_grade, LetterGrade::Ungraded);
    }

    #[tokio::test]
    async fn test_resubmission_keeps_score() {
        let f = fixture().await;
        let s = &f.storage;

        let first = s
            .upsert_submission(f.homework, "u0000001", "draft".into())
            .await
            .unwrap();
        assert_eq!(first.score, Some(0));

        s.grade_submission(f.homework, "u0000001", 77)
            .await
            .unwrap();
        let second = s
            .upsert_submission(f.homework, "u0000001", "final".into())
            .await
            .unwrap();
        assert_eq!(second.score, Some(77));
        assert_eq!(second.contents.as_deref(), Some("final"));
    }

    #[tokio::test]
    async fn test_grading_without_submission_is_none() {
        let f = fixture().await;
        assert!(
            f.storage
                .grade_submission(f.homework, "u0000001", 10)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_failed_regrade_discards_new_assignment() {
        let storage = memory_storage().await;
        let class_id = seed_class(&storage).await;
        let category = storage
            .create_category(class_id, "Homework", 100)
            .await
            .unwrap();
        storage.enroll_student(class_id, "u0000001").await.unwrap();
        freeze_letter_grades(&storage).await;

        // "--" -> "E" 的写回被中止，整个事务回滚
        let err = storage
            .create_assignment(new_assignment(category.id, "HW1", 100))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");
        assert_eq!(
            storage.find_assignment_id(category.id, "HW1").await.unwrap(),
            None
        );
        assert_eq!(letters(&storage, "u0000001").await, vec!["--".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_regrade_discards_score() {
        let f = fixture().await;
        let s = &f.storage;

        submit_and_grade(s, f.exam, "u0000001", 100).await;
        s.upsert_submission(f.homework, "u0000001", "hw".into())
            .await
            .unwrap();
        assert_eq!(letters(s, "u0000001").await, vec!["D-".to_string()]);
        freeze_letter_grades(s).await;

        // D- -> A 的写回被中止，得分保持为 0
        let err = s
            .grade_submission(f.homework, "u0000001", 100)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E003");

        let students = vec!["u0000001".to_string()];
        let gradebook = load_gradebook(&s.db, f.class_id, &students).await.unwrap();
        assert_eq!(gradebook.scores[&f.homework].get("u0000001"), Some(&0));
        assert_eq!(letters(s, "u0000001").await, vec!["D-".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_grading_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: dir.path().join("lms.db").to_string_lossy().into_owned(),
            pool_size: 8,
            timeout: 10,
        };
        let storage = SeaOrmStorage::connect(&config).await.unwrap();
        let class_id = seed_class(&storage).await;
        let category = storage
            .create_category(class_id, "Homework", 100)
            .await
            .unwrap();
        let (assignment, _) = storage
            .create_assignment(new_assignment(category.id, "HW1", 100))
            .await
            .unwrap();
        let assignment_id = assignment.id;

        let uids: Vec<String> = (1..=16).map(|n| format!("u{n:07}")).collect();
        for uid in &uids {
            storage.enroll_student(class_id, uid).await.unwrap();
            storage
                .upsert_submission(assignment_id, uid, "answer".into())
                .await
                .unwrap();
        }

        let mut handles = Vec::new();
        for (i, uid) in uids.iter().cloned().enumerate() {
            let storage = storage.clone();
            let score = if i % 2 == 0 { 95 } else { 50 };
            handles.push(tokio::spawn(async move {
                if i % 4 == 0 {
                    storage.recompute_class_grades(class_id).await?;
                }
                storage.grade_submission(assignment_id, &uid, score).await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().is_some());
        }

        for (i, uid) in uids.iter().enumerate() {
            let expected = if i % 2 == 0 { "A" } else { "E" };
            assert_eq!(letters(&storage, uid).await, vec![expected.to_string()]);
        }
    }

    #[tokio::test]
    async fn test_duplicates_conflict() {
        let f = fixture().await;
        let s = &f.storage;

        let err = s.enroll_student(f.class_id, "u0000001").await.unwrap_err();
        assert_eq!(err.code(), "E006");

        let err = s
            .create_category(f.class_id, "Homework", 10)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");

        let category_id = s
            .find_category_id(f.class_id, "Homework")
            .await
            .unwrap()
            .unwrap();
        let err = s
            .create_assignment(new_assignment(category_id, "HW1", 50))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E006");
        assert_eq!(
            s.find_assignment_id(category_id, "HW1").await.unwrap(),
            Some(f.homework)
        );
    }
}
