//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 评分计算本身不会产生错误（退化输入映射为哨兵值），
//! 这里的错误只来自数据查找、校验和持久化。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_lms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum LmsError {
            $($variant(String),)*
        }

        impl LmsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(LmsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(LmsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl LmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        LmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_lms_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Data Not Found"),
    Conflict("E006", "Persistence Conflict"),
    DateParse("E007", "Date Parse Error"),
}

impl LmsError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否为调用方可以修正的错误（不需要记录为服务端故障）
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LmsError::Validation(_)
                | LmsError::DateParse(_)
                | LmsError::NotFound(_)
                | LmsError::Conflict(_)
        )
    }
}

impl fmt::Display for LmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LmsError {}

// 唯一约束冲突单独归类为 Conflict，其余数据库错误归为 DatabaseOperation
impl From<sea_orm::DbErr> for LmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => LmsError::Conflict(msg),
            _ => LmsError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<chrono::ParseError> for LmsError {
    fn from(err: chrono::ParseError) -> Self {
        LmsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LmsError::database_config("test").code(), "E001");
        assert_eq!(LmsError::validation("test").code(), "E004");
        assert_eq!(LmsError::not_found("test").code(), "E005");
        assert_eq!(LmsError::conflict("test").code(), "E006");
        assert_eq!(LmsError::date_parse("test").code(), "E007");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(LmsError::not_found("test").error_type(), "Data Not Found");
        assert_eq!(
            LmsError::conflict("test").error_type(),
            "Persistence Conflict"
        );
    }

    #[test]
    fn test_client_errors() {
        assert!(LmsError::validation("bad season").is_client_error());
        assert!(LmsError::not_found("no class").is_client_error());
        assert!(LmsError::date_parse("25:00").is_client_error());
        assert!(!LmsError::database_operation("boom").is_client_error());
    }

    #[test]
    fn test_db_err_maps_to_database_operation() {
        let err: LmsError = sea_orm::DbErr::Custom("connection reset".into()).into();
        assert_eq!(err.code(), "E003");
        assert!(err.message().contains("connection reset"));
    }

    #[test]
    fn test_format_simple() {
        let err = LmsError::not_found("Class CS 5530 Fall 2024 not found");
        let formatted = err.format_simple();
        assert!(formatted.contains("Data Not Found"));
        assert!(formatted.contains("CS 5530"));
    }
}
