use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 未建档用户在批量读取时的显示名前缀
pub const DEFAULT_DISPLAY_NAME_PREFIX: &str = "User ";

// 用户角色
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
    // 未设置或无法识别的角色
    #[default]
    #[serde(rename = "")]
    #[serde(other)]
    Unspecified,
}

// 用户资料
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileRecord {
    // 与用户ID相同
    pub id: String,
    pub display_name: String,
    pub student_id: String,
    pub teacher_id: String,
    // 外部地址或 data: URL
    pub profile_picture: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProfileRecord {
    /// 尚未建档时返回的空资料
    pub fn empty(user_id: &str) -> Self {
        Self {
            id: user_id.to_string(),
            ..Default::default()
        }
    }

    /// 批量读取时为缺失的资料生成占位
    pub fn placeholder(user_id: &str) -> Self {
        let short_id: String = user_id.chars().take(8).collect();
        Self {
            display_name: format!("{DEFAULT_DISPLAY_NAME_PREFIX}{short_id}"),
            ..Self::empty(user_id)
        }
    }
}
