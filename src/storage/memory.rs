//! 进程内文档存储
//!
//! 使用 `memory://` URL 启用，也用于测试。每个文档的修改在 DashMap 分片锁内完成，
//! 因此数组操作是原子的。

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::document::{
    self, ArrayMutation, Collection, Document, DocumentData, FieldFilter, MAX_BATCH_SIZE,
    millis_to_datetime, monotonic_now_millis,
};
use super::{BackendKind, DocumentBackend};
use crate::errors::{AttendlyError, Result};

pub struct MemoryBackend {
    kind: BackendKind,
    documents: DashMap<(Collection, String), Document>,
    /// 批量读取调用次数
    pub get_many_calls: AtomicU64,
    /// 单次批量读取的最大 ID 数
    pub largest_batch: AtomicUsize,
}

impl MemoryBackend {
    pub fn new(kind: BackendKind) -> Self {
        debug!("MemoryBackend initialized ({})", kind.as_str());
        Self {
            kind,
            documents: DashMap::new(),
            get_many_calls: AtomicU64::new(0),
            largest_batch: AtomicUsize::new(0),
        }
    }

    fn key(collection: Collection, id: &str) -> (Collection, String) {
        (collection, id.to_string())
    }

    /// 在分片锁内修改文档，`mutate` 返回 false 表示没有变化
    fn mutate<F>(&self, collection: Collection, id: &str, mutate: F) -> Option<(bool, Document)>
    where
        F: FnOnce(&mut DocumentData) -> bool,
    {
        let mut entry = self.documents.get_mut(&Self::key(collection, id))?;
        let changed = mutate(&mut entry.data);
        if changed {
            entry.updated_at = millis_to_datetime(monotonic_now_millis());
        }
        Some((changed, entry.clone()))
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(BackendKind::Privileged)
    }
}

#[async_trait]
impl DocumentBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        Ok(self
            .documents
            .get(&Self::key(collection, id))
            .map(|doc| doc.clone()))
    }

    async fn get_many(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<Option<Document>>> {
        if ids.len() > MAX_BATCH_SIZE {
            return Err(AttendlyError::backend_operation(format!(
                "batch read of {} documents exceeds the limit of {MAX_BATCH_SIZE}",
                ids.len()
            )));
        }
        self.get_many_calls.fetch_add(1, Ordering::Relaxed);
        self.largest_batch.fetch_max(ids.len(), Ordering::Relaxed);

        Ok(ids
            .iter()
            .map(|id| {
                self.documents
                    .get(&Self::key(collection, id))
                    .map(|doc| doc.clone())
            })
            .collect())
    }

    async fn find(&self, collection: Collection, filter: &FieldFilter) -> Result<Vec<Document>> {
        Ok(self
            .documents
            .iter()
            .filter(|entry| entry.key().0 == collection && filter.matches(&entry.value().data))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn insert(&self, collection: Collection, data: DocumentData) -> Result<Document> {
        let now = millis_to_datetime(monotonic_now_millis());
        let mut body = DocumentData::new();
        document::merge_data(&mut body, data);
        let doc = Document {
            id: Uuid::new_v4().to_string(),
            data: body,
            created_at: now,
            updated_at: now,
        };
        self.documents
            .insert(Self::key(collection, &doc.id), doc.clone());
        Ok(doc)
    }

    async fn set_merge(
        &self,
        collection: Collection,
        id: &str,
        data: DocumentData,
    ) -> Result<Document> {
        let now = millis_to_datetime(monotonic_now_millis());
        let mut entry = self
            .documents
            .entry(Self::key(collection, id))
            .or_insert_with(|| Document {
                id: id.to_string(),
                data: DocumentData::new(),
                created_at: now,
                updated_at: now,
            });
        document::merge_data(&mut entry.data, data);
        entry.updated_at = now;
        Ok(entry.clone())
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: DocumentData,
    ) -> Result<Option<Document>> {
        Ok(self
            .mutate(collection, id, |data| {
                document::merge_data(data, patch);
                true
            })
            .map(|(_, doc)| doc))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        Ok(self.documents.remove(&Self::key(collection, id)).is_some())
    }

    async fn array_union(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<ArrayMutation>> {
        Ok(self
            .mutate(collection, id, |data| {
                document::array_union(data, field, &value)
            })
            .map(|(changed, document)| ArrayMutation { changed, document }))
    }

    async fn array_remove(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<ArrayMutation>> {
        Ok(self
            .mutate(collection, id, |data| {
                document::array_remove(data, field, &value)
            })
            .map(|(changed, document)| ArrayMutation { changed, document }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn body(value: Value) -> DocumentData {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let backend = MemoryBackend::default();
        let doc = backend
            .insert(Collection::Classes, body(json!({ "className": "Math" })))
            .await
            .unwrap();
        let loaded = backend
            .get(Collection::Classes, &doc.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, doc);
        assert!(
            backend
                .get(Collection::UserProfiles, &doc.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let backend = MemoryBackend::default();
        let result = backend
            .update(Collection::Classes, "nope", body(json!({ "room": "1" })))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_set_merge_preserves_created_at() {
        let backend = MemoryBackend::default();
        let first = backend
            .set_merge(Collection::UserProfiles, "u1", body(json!({ "displayName": "A" })))
            .await
            .unwrap();
        let second = backend
            .set_merge(Collection::UserProfiles, "u1", body(json!({ "email": "a@x.io" })))
            .await
            .unwrap();
        assert_eq!(first.created_at, second.created_at);
        assert!(second.updated_at > first.updated_at);
        assert_eq!(second.data["displayName"], json!("A"));
        assert_eq!(second.data["email"], json!("a@x.io"));
    }

    #[tokio::test]
    async fn test_unchanged_array_op_keeps_timestamp() {
        let backend = MemoryBackend::default();
        let doc = backend
            .insert(Collection::Classes, body(json!({ "students": ["u1"] })))
            .await
            .unwrap();
        let result = backend
            .array_union(Collection::Classes, &doc.id, "students", json!("u1"))
            .await
            .unwrap()
            .unwrap();
        assert!(!result.changed);
        assert_eq!(result.document.updated_at, doc.updated_at);
    }

    #[tokio::test]
    async fn test_get_many_rejects_oversized_batch() {
        let backend = MemoryBackend::default();
        let ids: Vec<String> = (0..11).map(|i| format!("u{i}")).collect();
        assert!(
            backend
                .get_many(Collection::UserProfiles, &ids)
                .await
                .is_err()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_array_union_keeps_every_value() {
        let backend = Arc::new(MemoryBackend::default());
        let doc = backend
            .insert(Collection::Classes, body(json!({ "students": [] })))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..32 {
            let backend = backend.clone();
            let id = doc.id.clone();
            handles.push(tokio::spawn(async move {
                backend
                    .array_union(Collection::Classes, &id, "students", json!(format!("s{i}")))
                    .await
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap().unwrap().unwrap().changed);
        }

        let stored = backend
            .get(Collection::Classes, &doc.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.data["students"].as_array().unwrap().len(), 32);
    }
}
