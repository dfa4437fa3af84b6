//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码、类型名称和严重级别。

use std::fmt;

use actix_web::http::StatusCode;

/// 面向调用方的错误级别
///
/// 所有错误最终归入以下四类之一，HTTP 状态码由级别决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    BadInput,
    NotFound,
    Conflict,
    Internal,
}

impl Severity {
    pub fn status_code(self) -> StatusCode {
        match self {
            Severity::BadInput => StatusCode::BAD_REQUEST,
            Severity::NotFound => StatusCode::NOT_FOUND,
            Severity::Conflict => StatusCode::CONFLICT,
            Severity::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - severity() 方法 - 返回错误级别
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_attendly_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $severity:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AttendlyError {
            $($variant(String),)*
        }

        impl AttendlyError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AttendlyError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AttendlyError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误级别
            pub fn severity(&self) -> Severity {
                match self {
                    $(AttendlyError::$variant(_) => Severity::$severity,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AttendlyError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl AttendlyError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AttendlyError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_attendly_errors! {
    BadInput("E001", "Bad Input", BadInput),
    NotFound("E002", "Resource Not Found", NotFound),
    Conflict("E003", "Conflict", Conflict),
    BackendConfig("E004", "Backend Configuration Error", Internal),
    BackendConnection("E005", "Backend Connection Error", Internal),
    BackendOperation("E006", "Backend Operation Error", Internal),
    PermissionDenied("E007", "Permission Denied", Internal),
    Serialization("E008", "Serialization Error", Internal),
    CacheConnection("E009", "Cache Connection Error", Internal),
    FileOperation("E010", "File Operation Error", Internal),
}

impl AttendlyError {
    /// 是否为内部错误（需要记录日志并隐藏细节）
    pub fn is_internal(&self) -> bool {
        self.severity() == Severity::Internal
    }

    /// HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        self.severity().status_code()
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AttendlyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AttendlyError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AttendlyError {
    fn from(err: sea_orm::DbErr) -> Self {
        AttendlyError::BackendOperation(err.to_string())
    }
}

impl From<std::io::Error> for AttendlyError {
    fn from(err: std::io::Error) -> Self {
        AttendlyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AttendlyError {
    fn from(err: serde_json::Error) -> Self {
        AttendlyError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AttendlyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AttendlyError::bad_input("test").code(), "E001");
        assert_eq!(AttendlyError::not_found("test").code(), "E002");
        assert_eq!(AttendlyError::conflict("test").code(), "E003");
        assert_eq!(AttendlyError::permission_denied("test").code(), "E007");
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(AttendlyError::bad_input("x").severity(), Severity::BadInput);
        assert_eq!(AttendlyError::conflict("x").severity(), Severity::Conflict);
        assert_eq!(
            AttendlyError::backend_connection("x").severity(),
            Severity::Internal
        );
        assert!(AttendlyError::permission_denied("x").is_internal());
        assert!(!AttendlyError::not_found("x").is_internal());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AttendlyError::bad_input("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AttendlyError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AttendlyError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AttendlyError::serialization("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_format_simple() {
        let err = AttendlyError::conflict("Already enrolled in this class");
        let formatted = err.format_simple();
        assert!(formatted.contains("Conflict"));
        assert!(formatted.contains("Already enrolled in this class"));
        assert_eq!(err.message(), "Already enrolled in this class");
    }
}
