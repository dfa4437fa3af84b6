pub mod create;
pub mod delete;
pub mod list;
pub mod lookup;
pub mod update;

use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::Result;
use crate::models::classes::entities::{ClassRecord, ClassSummary, MemberClass};
use crate::models::classes::requests::{CreateClassRequest, UpdateClassRequest};
use crate::storage::{ClassStore, ProfileStore};

pub use lookup::invitation_cache_key;

#[derive(Clone)]
pub struct ClassService {
    classes: ClassStore,
    profiles: ProfileStore,
    cache: Arc<dyn ObjectCache>,
}

impl ClassService {
    pub fn new(classes: ClassStore, profiles: ProfileStore, cache: Arc<dyn ObjectCache>) -> Self {
        Self {
            classes,
            profiles,
            cache,
        }
    }

    pub(crate) fn classes(&self) -> &ClassStore {
        &self.classes
    }

    pub(crate) fn cache(&self) -> &dyn ObjectCache {
        self.cache.as_ref()
    }

    // 创建班级
    pub async fn create_class(&self, request: CreateClassRequest) -> Result<ClassRecord> {
        create::create_class(self, request).await
    }

    // 教师创建的班级
    pub async fn list_owner_classes(&self, teacher_id: Option<&str>) -> Result<Vec<ClassRecord>> {
        list::list_owner_classes(self, teacher_id).await
    }

    // 学生加入的班级，附带教师名称
    pub async fn list_member_classes(&self, student_id: Option<&str>) -> Result<Vec<MemberClass>> {
        list::list_member_classes(self, student_id).await
    }

    // 根据邀请码解析班级
    pub async fn resolve_by_code(&self, code: &str) -> Result<ClassRecord> {
        lookup::resolve_by_code(self, code).await
    }

    // 根据邀请码获取班级公开信息
    pub async fn lookup_class(&self, code: &str) -> Result<ClassSummary> {
        Ok(self.resolve_by_code(code).await?.summary())
    }

    // 更新班级元数据
    pub async fn update_class(
        &self,
        class_id: &str,
        request: UpdateClassRequest,
    ) -> Result<ClassRecord> {
        update::update_class(self, class_id, request).await
    }

    // 删除班级
    pub async fn delete_class(&self, class_id: &str) -> Result<()> {
        delete::delete_class(self, class_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::cache::MokaCacheWrapper;
    use crate::config::CacheConfig;
    use crate::storage::{DocumentBackend, MemoryBackend};

    pub fn class_service() -> ClassService {
        class_service_with(Arc::new(MemoryBackend::default()))
    }

    pub fn class_service_with(backend: Arc<dyn DocumentBackend>) -> ClassService {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new(&CacheConfig::default()));
        ClassService::new(
            ClassStore::new(backend.clone()),
            ProfileStore::new(backend, cache.clone()),
            cache,
        )
    }

    pub fn new_class(teacher_id: &str, subject: &str, section: &str) -> CreateClassRequest {
        CreateClassRequest {
            teacher_id: teacher_id.into(),
            class_name: format!("{subject} {section}"),
            subject: subject.into(),
            section: section.into(),
            ..Default::default()
        }
    }
}
