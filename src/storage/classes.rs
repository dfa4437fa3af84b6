//! 班级存储
//!
//! 在文档后端之上提供类型化的班级读写。按字段查询的结果在内存中按创建时间排序。

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::errors::{AttendlyError, Result};
use crate::models::classes::entities::{ClassRecord, DEFAULT_MAX_STUDENTS};
use crate::models::classes::requests::{CreateClassRequest, UpdateClassRequest};
use crate::storage::document::{self, Collection, Document, FieldFilter};
use crate::storage::DocumentBackend;
use crate::utils::generate_class_code;

/// 生成不重复邀请码的最大尝试次数
const MAX_CODE_ATTEMPTS: usize = 5;

const STUDENTS_FIELD: &str = "students";

/// 成员变更结果
#[derive(Debug, Clone)]
pub struct RosterChange {
    /// 成员列表是否发生变化
    pub changed: bool,
    /// 变更后的班级
    pub class: ClassRecord,
}

#[derive(Clone)]
pub struct ClassStore {
    backend: Arc<dyn DocumentBackend>,
}

impl ClassStore {
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self { backend }
    }

    /// 创建班级并生成邀请码，成员列表为空
    pub async fn create(&self, request: &CreateClassRequest) -> Result<ClassRecord> {
        let class_code = self
            .allocate_code(&request.subject, &request.section)
            .await?;

        let body = json!({
            "teacherId": request.teacher_id.trim(),
            "classNumber": request.class_number,
            "className": request.class_name.trim(),
            "subject": request.subject.trim(),
            "section": request.section.trim(),
            "room": request.room,
            "description": request.description,
            "schedule": request.schedule,
            "days": request.days,
            "startTime": request.start_time,
            "endTime": request.end_time,
            "startDate": request.start_date,
            "endDate": request.end_date,
            "maxStudents": request.max_students.unwrap_or(DEFAULT_MAX_STUDENTS),
            "classCode": class_code,
            "students": [],
        });

        let doc = self
            .backend
            .insert(Collection::Classes, document::to_document_data(&body)?)
            .await?;
        debug!("Created class {} with code {}", doc.id, class_code);
        doc.into_record()
    }

    /// 生成尚未被使用的邀请码
    async fn allocate_code(&self, subject: &str, section: &str) -> Result<String> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_class_code(subject, section);
            if !self.code_in_use(&code).await? {
                return Ok(code);
            }
            warn!("Class code collision on attempt {}: {}", attempt, code);
        }
        Err(AttendlyError::backend_operation(format!(
            "failed to allocate a unique class code after {MAX_CODE_ATTEMPTS} attempts"
        )))
    }

    pub async fn code_in_use(&self, code: &str) -> Result<bool> {
        Ok(!self
            .backend
            .find(Collection::Classes, &FieldFilter::equals("classCode", code))
            .await?
            .is_empty())
    }

    pub async fn get(&self, class_id: &str) -> Result<Option<ClassRecord>> {
        self.backend
            .get(Collection::Classes, class_id)
            .await?
            .map(Document::into_record)
            .transpose()
    }

    /// 按邀请码查找，按创建时间升序返回
    pub async fn find_by_code(&self, code: &str) -> Result<Vec<ClassRecord>> {
        let mut classes = self
            .find_records(FieldFilter::equals("classCode", code))
            .await?;
        classes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(classes)
    }

    /// 教师创建的班级，最新的在前
    pub async fn list_by_teacher(&self, teacher_id: &str) -> Result<Vec<ClassRecord>> {
        let mut classes = self
            .find_records(FieldFilter::equals("teacherId", teacher_id))
            .await?;
        sort_newest_first(&mut classes);
        Ok(classes)
    }

    /// 学生所在的班级，最新的在前
    pub async fn list_by_member(&self, member_id: &str) -> Result<Vec<ClassRecord>> {
        let mut classes = self
            .find_records(FieldFilter::array_contains(STUDENTS_FIELD, member_id))
            .await?;
        sort_newest_first(&mut classes);
        Ok(classes)
    }

    async fn find_records(&self, filter: FieldFilter) -> Result<Vec<ClassRecord>> {
        self.backend
            .find(Collection::Classes, &filter)
            .await?
            .into_iter()
            .map(Document::into_record)
            .collect()
    }

    /// 更新元数据，班级不存在时返回 None
    pub async fn update_metadata(
        &self,
        class_id: &str,
        request: &UpdateClassRequest,
    ) -> Result<Option<ClassRecord>> {
        let patch = document::to_document_data(request)?;
        self.backend
            .update(Collection::Classes, class_id, patch)
            .await?
            .map(Document::into_record)
            .transpose()
    }

    pub async fn delete(&self, class_id: &str) -> Result<bool> {
        self.backend.delete(Collection::Classes, class_id).await
    }

    /// 原子地加入成员，班级不存在时返回 None
    pub async fn add_member(&self, class_id: &str, member_id: &str) -> Result<Option<RosterChange>> {
        let mutation = self
            .backend
            .array_union(
                Collection::Classes,
                class_id,
                STUDENTS_FIELD,
                Value::String(member_id.to_string()),
            )
            .await?;
        mutation
            .map(|m| {
                Ok(RosterChange {
                    changed: m.changed,
                    class: m.document.into_record()?,
                })
            })
            .transpose()
    }

    /// 原子地移除成员，班级不存在时返回 None
    pub async fn remove_member(
        &self,
        class_id: &str,
        member_id: &str,
    ) -> Result<Option<RosterChange>> {
        let mutation = self
            .backend
            .array_remove(
                Collection::Classes,
                class_id,
                STUDENTS_FIELD,
                Value::String(member_id.to_string()),
            )
            .await?;
        mutation
            .map(|m| {
                Ok(RosterChange {
                    changed: m.changed,
                    class: m.document.into_record()?,
                })
            })
            .transpose()
    }
}

fn sort_newest_first(classes: &mut [ClassRecord]) {
    classes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
