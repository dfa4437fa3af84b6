use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::AttendlyError;
use crate::models::ErrorCode;

// 统一的API响应结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code as i32,
            message: message.into(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// 将业务错误转换为 HTTP 响应
///
/// 内部错误只记录日志，对外返回 `failure_message`；其余错误直接返回错误详情。
pub fn error_response(err: &AttendlyError, failure_message: &str) -> HttpResponse {
    let message = if err.is_internal() {
        error!("{}: {}", failure_message, err);
        failure_message.to_string()
    } else {
        err.message().to_string()
    };

    HttpResponse::build(err.status_code())
        .json(ApiResponse::error_empty(ErrorCode::from(err), message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;

    #[actix_web::test]
    async fn test_internal_error_hides_details() {
        let err = AttendlyError::backend_connection("password authentication failed");
        let resp = error_response(&err, "Failed to fetch classes");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Failed to fetch classes");
        assert_eq!(json["code"], ErrorCode::Internal as i32);
    }

    #[actix_web::test]
    async fn test_conflict_keeps_message() {
        let err = AttendlyError::conflict("Already enrolled in this class");
        let resp = error_response(&err, "Failed to join class");
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Already enrolled in this class");
        assert!(json.get("data").is_none());
    }
}
