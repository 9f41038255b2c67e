//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod classes;
mod courses;
mod departments;
mod enrollments;
mod grading;
mod submissions;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{LmsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ConnectOptions, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    SqliteTransactionMode, TransactionOptions, TransactionTrait,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| LmsError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// 开启写事务
    ///
    /// SQLite 下以 `BEGIN IMMEDIATE` 开启，事务开始即持有写锁并受 busy_timeout 约束，
    /// 其他后端忽略该选项，行锁由 `SELECT ... FOR UPDATE` 负责。
    pub(crate) async fn begin_write(&self) -> Result<DatabaseTransaction> {
        self.db
            .begin_with_options(TransactionOptions {
                sqlite_transaction_mode: Some(SqliteTransactionMode::Immediate),
                ..Default::default()
            })
            .await
            .map_err(|e| LmsError::database_operation(format!("开启事务失败: {e}")))
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| LmsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| LmsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(LmsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 数据库错误转换：唯一约束冲突保留为 Conflict，其余附加操作说明
pub(crate) fn db_error(action: &'static str) -> impl Fn(DbErr) -> LmsError {
    move |e| match LmsError::from(e) {
        LmsError::DatabaseOperation(msg) => {
            LmsError::database_operation(format!("{action}: {msg}"))
        }
        other => other,
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(department).await
    }

    async fn create_course(&self, course: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(course).await
    }

    async fn create_class(&self, class: NewClass) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn find_class_id(&self, key: &ClassKey) -> Result<Option<i64>> {
        self.find_class_id_impl(key).await
    }

    async fn create_category(
        &self,
        class_id: i64,
        name: &str,
        weight: u8,
    ) -> Result<AssignmentCategory> {
        self.create_category_impl(class_id, name, weight).await
    }

    async fn find_category_id(&self, class_id: i64, name: &str) -> Result<Option<i64>> {
        self.find_category_id_impl(class_id, name).await
    }

    async fn create_assignment(
        &self,
        assignment: NewAssignment,
    ) -> Result<(Assignment, Vec<StudentGrade>)> {
        self.create_assignment_impl(assignment).await
    }

    async fn find_assignment_id(&self, category_id: i64, name: &str) -> Result<Option<i64>> {
        self.find_assignment_id_impl(category_id, name).await
    }

    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_uid: &str,
        contents: String,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_uid, contents)
            .await
    }

    async fn grade_submission(
        &self,
        assignment_id: i64,
        student_uid: &str,
        score: u16,
    ) -> Result<Option<(Submission, Option<StudentGrade>)>> {
        self.grade_submission_impl(assignment_id, student_uid, score)
            .await
    }

    async fn enroll_student(&self, class_id: i64, student_uid: &str) -> Result<Enrollment> {
        self.enroll_student_impl(class_id, student_uid).await
    }

    async fn list_student_letter_grades(&self, student_uid: &str) -> Result<Vec<String>> {
        self.list_student_letter_grades_impl(student_uid).await
    }

    async fn recompute_class_grades(&self, class_id: i64) -> Result<Vec<StudentGrade>> {
        self.recompute_class_grades_impl(class_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::config::DatabaseConfig;
    use crate::models::{
        ClassKey, classes::requests::NewClass, courses::requests::CreateCourseRequest,
        departments::requests::CreateDepartmentRequest,
    };
    use chrono::NaiveTime;

    /// 单连接内存数据库，已运行迁移
    pub(crate) async fn memory_storage() -> SeaOrmStorage {
        let config = DatabaseConfig {
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        };
        SeaOrmStorage::connect(&config)
            .await
            .expect("in-memory sqlite should connect")
    }

    /// CS 5530 Fall 2024 的业务键
    pub(crate) fn cs5530_key() -> ClassKey {
        ClassKey {
            subject: "CS".to_string(),
            num: 5530,
            season: "Fall".to_string(),
            year: 2024,
        }
    }

    /// 创建院系、课程和一门开课，返回开课ID
    pub(crate) async fn seed_class(storage: &SeaOrmStorage) -> i64 {
        let key = cs5530_key();
        storage
            .create_department_impl(CreateDepartmentRequest {
                subject: key.subject.clone(),
                name: "Computer Science".to_string(),
            })
            .await
            .unwrap();
        storage
            .create_course_impl(CreateCourseRequest {
                subject: key.subject.clone(),
                number: key.num,
                name: "Database Systems".to_string(),
            })
            .await
            .unwrap();
        storage
            .create_class_impl(NewClass {
                subject: key.subject,
                number: key.num,
                season: key.season,
                year: key.year,
                location: "WEB L104".to_string(),
                start_time: NaiveTime::from_hms_opt(9, 10, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
                instructor_uid: "u0000100".to_string(),
            })
            .await
            .unwrap()
            .id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("lms.db").unwrap(),
            "sqlite://lms.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite://:memory:?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://localhost/lms").unwrap(),
            "postgres://localhost/lms"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("redis://localhost")
                .unwrap_err()
                .code(),
            "E001"
        );
    }

    #[test]
    fn test_db_error_keeps_context() {
        let err = db_error("创建院系失败")(DbErr::Custom("disk full".into()));
        assert_eq!(err.code(), "E003");
        assert!(err.message().starts_with("创建院系失败"));
    }
}
