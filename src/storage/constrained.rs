//! 受限后端连接
//!
//! 包装任意后端，在每次调用前按集合检查访问规则。

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::document::{ArrayMutation, Collection, Document, DocumentData, FieldFilter};
use super::{BackendKind, DocumentBackend};
use crate::config::AccessRulesConfig;
use crate::errors::{AttendlyError, Result};

/// 访问规则中的操作类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessOp {
    Read,
    Write,
    Delete,
}

impl AccessOp {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "read" => Ok(AccessOp::Read),
            "write" => Ok(AccessOp::Write),
            "delete" => Ok(AccessOp::Delete),
            other => Err(AttendlyError::backend_config(format!(
                "Unknown access rule operation: {other}"
            ))),
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            AccessOp::Read => "read",
            AccessOp::Write => "write",
            AccessOp::Delete => "delete",
        }
    }
}

/// 每个集合允许的操作
#[derive(Debug, Clone, Default)]
pub struct AccessRules {
    classes: HashSet<AccessOp>,
    user_profiles: HashSet<AccessOp>,
}

impl AccessRules {
    pub fn from_config(config: &AccessRulesConfig) -> Result<Self> {
        let parse_all = |ops: &[String]| -> Result<HashSet<AccessOp>> {
            ops.iter().map(|op| AccessOp::parse(op)).collect()
        };
        Ok(Self {
            classes: parse_all(&config.classes)?,
            user_profiles: parse_all(&config.user_profiles)?,
        })
    }

    pub fn allow(mut self, collection: Collection, op: AccessOp) -> Self {
        self.ops_mut(collection).insert(op);
        self
    }

    fn ops(&self, collection: Collection) -> &HashSet<AccessOp> {
        match collection {
            Collection::Classes => &self.classes,
            Collection::UserProfiles => &self.user_profiles,
        }
    }

    fn ops_mut(&mut self, collection: Collection) -> &mut HashSet<AccessOp> {
        match collection {
            Collection::Classes => &mut self.classes,
            Collection::UserProfiles => &mut self.user_profiles,
        }
    }

    pub fn check(&self, collection: Collection, op: AccessOp) -> Result<()> {
        if self.ops(collection).contains(&op) {
            Ok(())
        } else {
            warn!(
                "Access rules deny {} on collection {}",
                op.as_str(),
                collection
            );
            Err(AttendlyError::permission_denied(format!(
                "permission-denied: {} on {}",
                op.as_str(),
                collection
            )))
        }
    }
}

pub struct ConstrainedBackend {
    inner: Arc<dyn DocumentBackend>,
    rules: AccessRules,
}

impl ConstrainedBackend {
    pub fn new(inner: Arc<dyn DocumentBackend>, rules: AccessRules) -> Self {
        Self { inner, rules }
    }
}

#[async_trait]
impl DocumentBackend for ConstrainedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Constrained
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        self.rules.check(collection, AccessOp::Read)?;
        self.inner.get(collection, id).await
    }

    async fn get_many(
        &self,
        collection: Collection,
        ids: &[String],
    ) -> Result<Vec<Option<Document>>> {
        self.rules.check(collection, AccessOp::Read)?;
        self.inner.get_many(collection, ids).await
    }

    async fn find(&self, collection: Collection, filter: &FieldFilter) -> Result<Vec<Document>> {
        self.rules.check(collection, AccessOp::Read)?;
        self.inner.find(collection, filter).await
    }

    async fn insert(&self, collection: Collection, data: DocumentData) -> Result<Document> {
        self.rules.check(collection, AccessOp::Write)?;
        self.inner.insert(collection, data).await
    }

    async fn set_merge(
        &self,
        collection: Collection,
        id: &str,
        data: DocumentData,
    ) -> Result<Document> {
        self.rules.check(collection, AccessOp::Write)?;
        self.inner.set_merge(collection, id, data).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: DocumentData,
    ) -> Result<Option<Document>> {
        self.rules.check(collection, AccessOp::Write)?;
        self.inner.update(collection, id, patch).await
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<bool> {
        self.rules.check(collection, AccessOp::Delete)?;
        self.inner.delete(collection, id).await
    }

    async fn array_union(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<ArrayMutation>> {
        self.rules.check(collection, AccessOp::Write)?;
        self.inner.array_union(collection, id, field, value).await
    }

    async fn array_remove(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<ArrayMutation>> {
        self.rules.check(collection, AccessOp::Write)?;
        self.inner.array_remove(collection, id, field, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Severity;
    use crate::storage::MemoryBackend;

    fn read_only_classes() -> ConstrainedBackend {
        let rules = AccessRules::default()
            .allow(Collection::Classes, AccessOp::Read)
            .allow(Collection::UserProfiles, AccessOp::Read)
            .allow(Collection::UserProfiles, AccessOp::Write);
        ConstrainedBackend::new(
            Arc::new(MemoryBackend::new(BackendKind::Constrained)),
            rules,
        )
    }

    #[tokio::test]
    async fn test_denied_write_is_internal_permission_error() {
        let backend = read_only_classes();
        let err = backend
            .insert(Collection::Classes, DocumentData::new())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
        assert_eq!(err.severity(), Severity::Internal);
    }

    #[tokio::test]
    async fn test_allowed_operations_pass_through() {
        let backend = read_only_classes();
        assert!(backend.get(Collection::Classes, "c1").await.unwrap().is_none());
        let doc = backend
            .set_merge(Collection::UserProfiles, "u1", DocumentData::new())
            .await
            .unwrap();
        assert_eq!(doc.id, "u1");
        assert!(backend.delete(Collection::UserProfiles, "u1").await.is_err());
    }

    #[test]
    fn test_rules_from_config() {
        let config = AccessRulesConfig {
            classes: vec!["READ".into(), " write ".into()],
            user_profiles: vec![],
        };
        let rules = AccessRules::from_config(&config).unwrap();
        assert!(rules.check(Collection::Classes, AccessOp::Write).is_ok());
        assert!(rules.check(Collection::Classes, AccessOp::Delete).is_err());
        assert!(rules.check(Collection::UserProfiles, AccessOp::Read).is_err());
    }
}
