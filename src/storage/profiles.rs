//! 用户资料存储
//!
//! 单个资料的读取经过对象缓存，写入和删除时使缓存失效。

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::cache::{self, ObjectCache};
use crate::errors::Result;
use crate::models::profiles::entities::ProfileRecord;
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::storage::document::{self, Collection, Document, DocumentData, MAX_BATCH_SIZE};
use crate::storage::DocumentBackend;

const PROFILE_PICTURE_FIELD: &str = "profilePicture";

pub fn profile_cache_key(user_id: &str) -> String {
    format!("profile:{user_id}")
}

#[derive(Clone)]
pub struct ProfileStore {
    backend: Arc<dyn DocumentBackend>,
    cache: Arc<dyn ObjectCache>,
}

impl ProfileStore {
    pub fn new(backend: Arc<dyn DocumentBackend>, cache: Arc<dyn ObjectCache>) -> Self {
        Self { backend, cache }
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<ProfileRecord>> {
        let key = profile_cache_key(user_id);
        if let Some(profile) = cache::get_json::<ProfileRecord>(self.cache.as_ref(), &key).await {
            return Ok(Some(profile));
        }

        let profile = self
            .backend
            .get(Collection::UserProfiles, user_id)
            .await?
            .map(Document::into_record::<ProfileRecord>)
            .transpose()?;

        if let Some(profile) = &profile {
            cache::insert_json(self.cache.as_ref(), key, profile).await;
        }
        Ok(profile)
    }

    /// 批量读取，结果与 `user_ids` 顺序一致
    ///
    /// 每次后端调用最多携带 `MAX_BATCH_SIZE` 个 ID。
    pub async fn get_many(&self, user_ids: &[String]) -> Result<Vec<Option<ProfileRecord>>> {
        let mut profiles = Vec::with_capacity(user_ids.len());
        for chunk in user_ids.chunks(MAX_BATCH_SIZE) {
            let docs = self
                .backend
                .get_many(Collection::UserProfiles, chunk)
                .await?;
            for doc in docs {
                profiles.push(doc.map(Document::into_record).transpose()?);
            }
        }
        debug!(
            "Fetched {} profiles in {} batch(es)",
            user_ids.len(),
            user_ids.len().div_ceil(MAX_BATCH_SIZE)
        );
        Ok(profiles)
    }

    /// 合并写入资料，不存在时创建
    pub async fn upsert(
        &self,
        user_id: &str,
        request: &UpdateProfileRequest,
    ) -> Result<ProfileRecord> {
        let patch = document::to_document_data(request)?;
        self.merge(user_id, patch).await
    }

    pub async fn set_picture(&self, user_id: &str, image_url: &str) -> Result<ProfileRecord> {
        let mut patch = DocumentData::new();
        patch.insert(
            PROFILE_PICTURE_FIELD.into(),
            Value::String(image_url.to_string()),
        );
        self.merge(user_id, patch).await
    }

    /// 清空头像，资料不存在时返回 None
    pub async fn clear_picture(&self, user_id: &str) -> Result<Option<ProfileRecord>> {
        let mut patch = DocumentData::new();
        patch.insert(PROFILE_PICTURE_FIELD.into(), Value::String(String::new()));

        let profile = self
            .backend
            .update(Collection::UserProfiles, user_id, patch)
            .await?
            .map(Document::into_record)
            .transpose()?;
        self.cache.remove(&profile_cache_key(user_id)).await;
        Ok(profile)
    }

    pub async fn delete(&self, user_id: &str) -> Result<bool> {
        let deleted = self
            .backend
            .delete(Collection::UserProfiles, user_id)
            .await?;
        self.cache.remove(&profile_cache_key(user_id)).await;
        Ok(deleted)
    }

    async fn merge(&self, user_id: &str, patch: DocumentData) -> Result<ProfileRecord> {
        let doc = self
            .backend
            .set_merge(Collection::UserProfiles, user_id, patch)
            .await?;
        self.cache.remove(&profile_cache_key(user_id)).await;
        doc.into_record()
    }
}
