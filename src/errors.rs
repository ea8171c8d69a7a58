//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_schoolsync_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SchoolSyncError {
            $($variant(String),)*
        }

        impl SchoolSyncError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SchoolSyncError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SchoolSyncError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SchoolSyncError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SchoolSyncError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SchoolSyncError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_schoolsync_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Conflict Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    Payment("E014", "Payment Error"),
}

impl SchoolSyncError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for SchoolSyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SchoolSyncError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SchoolSyncError {
    fn from(err: sea_orm::DbErr) -> Self {
        // 唯一索引冲突单独归类，便于上层返回 409
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(msg)) => {
                SchoolSyncError::Conflict(msg)
            }
            _ => SchoolSyncError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for SchoolSyncError {
    fn from(err: std::io::Error) -> Self {
        SchoolSyncError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SchoolSyncError {
    fn from(err: serde_json::Error) -> Self {
        SchoolSyncError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SchoolSyncError {
    fn from(err: chrono::ParseError) -> Self {
        SchoolSyncError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SchoolSyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SchoolSyncError::cache_connection("test").code(), "E001");
        assert_eq!(SchoolSyncError::database_config("test").code(), "E003");
        assert_eq!(SchoolSyncError::validation("test").code(), "E007");
        assert_eq!(SchoolSyncError::authentication("test").code(), "E012");
        assert_eq!(SchoolSyncError::payment("test").code(), "E014");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            SchoolSyncError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            SchoolSyncError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = SchoolSyncError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_conflict_code() {
        let err = SchoolSyncError::conflict("duplicate attendance");
        assert_eq!(err.code(), "E010");
        assert_eq!(err.error_type(), "Conflict Error");
    }

    #[test]
    fn test_format_simple() {
        let err = SchoolSyncError::validation("Invalid pincode");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid pincode"));
    }
}
