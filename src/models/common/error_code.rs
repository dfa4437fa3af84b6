use crate::errors::{AttendlyError, Severity};

// 响应码，按错误级别划分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,
    BadInput = 4000,
    NotFound = 4040,
    Conflict = 4090,
    Internal = 5000,
}

impl From<Severity> for ErrorCode {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::BadInput => ErrorCode::BadInput,
            Severity::NotFound => ErrorCode::NotFound,
            Severity::Conflict => ErrorCode::Conflict,
            Severity::Internal => ErrorCode::Internal,
        }
    }
}

impl From<&AttendlyError> for ErrorCode {
    fn from(err: &AttendlyError) -> Self {
        err.severity().into()
    }
}
