use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 未指定容量时的默认值，仅作为提示，不做强制
pub const DEFAULT_MAX_STUDENTS: u32 = 30;

fn default_max_students() -> u32 {
    DEFAULT_MAX_STUDENTS
}

// 课程时间段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

// 班级记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    // 班级ID
    pub id: String,
    // 教师ID，创建后不可修改
    pub teacher_id: String,
    #[serde(default)]
    pub class_number: String,
    pub class_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntry>,
    // 简化的上课时间：星期列表与 HH:MM 起止时间
    #[serde(default)]
    pub days: Vec<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default = "default_max_students")]
    pub max_students: u32,
    // 邀请码
    pub class_code: String,
    // 成员ID，语义上是集合
    #[serde(default)]
    pub students: Vec<String>,
    // 创建时间
    pub created_at: DateTime<Utc>,
    // 更新时间
    pub updated_at: DateTime<Utc>,
}

impl ClassRecord {
    pub fn has_member(&self, member_id: &str) -> bool {
        self.students.iter().any(|id| id == member_id)
    }

    /// 不包含成员列表的公开信息
    pub fn summary(&self) -> ClassSummary {
        ClassSummary {
            id: self.id.clone(),
            class_name: self.class_name.clone(),
            subject: self.subject.clone(),
            section: self.section.clone(),
            teacher_id: self.teacher_id.clone(),
            schedule: self.schedule.clone(),
            room: self.room.clone(),
            description: self.description.clone(),
            student_count: self.students.len(),
        }
    }
}

// 通过邀请码查询到的班级公开信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: String,
    pub class_name: String,
    pub subject: String,
    pub section: String,
    pub teacher_id: String,
    pub schedule: Vec<ScheduleEntry>,
    pub room: String,
    pub description: String,
    pub student_count: usize,
}

// 学生视角的班级，附带教师显示名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberClass {
    #[serde(flatten)]
    pub class: ClassRecord,
    pub teacher_name: String,
}

// 加入班级后的结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedClass {
    #[serde(flatten)]
    pub class: ClassRecord,
    pub joined_at: DateTime<Utc>,
}
