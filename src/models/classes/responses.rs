use serde::Serialize;

use super::entities::{ClassRecord, MemberClass};

// 教师班级列表响应
#[derive(Debug, Serialize)]
pub struct ClassListResponse {
    pub items: Vec<ClassRecord>,
}

// 学生班级列表响应
#[derive(Debug, Serialize)]
pub struct MemberClassListResponse {
    pub items: Vec<MemberClass>,
}
