//! 班级成员变更
//!
//! 加入与移除都依赖后端的原子数组操作，并发请求不会互相覆盖。

pub mod join;
pub mod leave;

use crate::errors::Result;
use crate::models::classes::entities::{ClassRecord, JoinedClass};
use crate::services::ClassService;

#[derive(Clone)]
pub struct RosterService {
    classes: ClassService,
}

impl RosterService {
    pub fn new(classes: ClassService) -> Self {
        Self { classes }
    }

    // 通过邀请码加入班级
    pub async fn join(&self, member_id: &str, code: &str) -> Result<JoinedClass> {
        join::join(self, member_id, code).await
    }

    // 加入已知ID的班级
    pub async fn join_class(&self, class_id: &str, member_id: &str) -> Result<JoinedClass> {
        join::join_class(self, class_id, member_id).await
    }

    // 学生主动离开班级
    pub async fn leave(&self, class_id: &str, member_id: &str) -> Result<ClassRecord> {
        leave::leave(self, class_id, member_id).await
    }

    // 教师移除学生
    pub async fn remove_member(&self, class_id: &str, member_id: &str) -> Result<ClassRecord> {
        leave::remove_member(self, class_id, member_id).await
    }
}
