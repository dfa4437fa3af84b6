use serde::{Deserialize, Serialize};

use super::entities::ScheduleEntry;

// 创建班级请求
//
// 必填字段：teacherId、className、subject、section，缺失时由服务层返回 BadInput，
// 因此这里全部允许缺省。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub teacher_id: String,
    pub class_number: String,
    pub class_name: String,
    pub subject: String,
    pub section: String,
    pub schedule: Vec<ScheduleEntry>,
    pub days: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub description: String,
    pub max_students: Option<u32>,
    pub start_date: String,
    pub end_date: String,
}

// 更新班级请求，仅包含元数据字段
//
// students、classCode、teacherId 不在此列，请求中出现也会被忽略。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateClassRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_students: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

// 教师班级列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerClassesQuery {
    pub teacher_id: Option<String>,
}

// 学生班级列表查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberClassesQuery {
    pub student_id: Option<String>,
}

// 通过邀请码加入班级请求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinClassRequest {
    pub student_id: String,
    pub invitation_code: String,
}

// 离开班级/移除学生请求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RosterMemberRequest {
    pub student_id: String,
}
