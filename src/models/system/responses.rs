use chrono::{DateTime, Utc};
use serde::Serialize;

/// 服务运行状态
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatusResponse {
    pub name: String,
    pub version: String,
    pub environment: String,
    // 当前使用的后端连接类型
    pub backend: String,
    pub cache_type: String,
    pub started_at: DateTime<Utc>,
    pub uptime_seconds: i64,
}
