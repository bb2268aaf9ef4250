//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::http::StatusCode;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_scholar_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum ScholarError {
            $($variant(String),)*
        }

        impl ScholarError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(ScholarError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(ScholarError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(ScholarError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl ScholarError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        ScholarError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_scholar_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Conflict Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
}

impl ScholarError {
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

    /// HTTP 边界层使用的状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            ScholarError::Validation(_) => StatusCode::BAD_REQUEST,
            ScholarError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ScholarError::Authorization(_) => StatusCode::FORBIDDEN,
            ScholarError::NotFound(_) => StatusCode::NOT_FOUND,
            ScholarError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ScholarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ScholarError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for ScholarError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                ScholarError::Conflict(detail)
            }
            _ => ScholarError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ScholarError {
    fn from(err: serde_json::Error) -> Self {
        ScholarError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScholarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ScholarError::cache_connection("test").code(), "E001");
        assert_eq!(ScholarError::database_config("test").code(), "E003");
        assert_eq!(ScholarError::validation("test").code(), "E007");
        assert_eq!(ScholarError::conflict("test").code(), "E010");
        assert_eq!(ScholarError::authentication("test").code(), "E012");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            ScholarError::cache_connection("test").error_type(),
            "Cache Connection Error"
        );
        assert_eq!(
            ScholarError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = ScholarError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_format_simple() {
        let err = ScholarError::not_found("Announcement 7");
        let formatted = err.format_simple();
        assert!(formatted.contains("Resource Not Found"));
        assert!(formatted.contains("Announcement 7"));
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ScholarError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ScholarError::authorization("x").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ScholarError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ScholarError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
