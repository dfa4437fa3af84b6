use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod classes;
pub mod constrained;
pub mod document;
pub mod memory;
pub mod profiles;
pub mod sea_orm_storage;

pub use classes::{ClassStore, RosterChange};
pub use constrained::{AccessOp, AccessRules, ConstrainedBackend};
pub use document::{
    ArrayMutation, Collection, Document, DocumentData, FieldFilter, MAX_BATCH_SIZE,
};
pub use memory::MemoryBackend;
pub use profiles::ProfileStore;
pub use sea_orm_storage::SeaOrmBackend;

/// 后端连接类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// 服务端持有特权凭据，不受访问规则约束
    Privileged,
    /// 受外部访问规则约束
    Constrained,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Privileged => "privileged",
            BackendKind::Constrained => "constrained",
        }
    }
}

#[async_trait::async_trait]
pub trait DocumentBackend: Send + Sync {
    /// 当前连接类型
    fn kind(&self) -> BackendKind;

    /// 读取方法
    // 通过ID读取单个文档
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<Document>>;
    // 批量读取，结果与 ids 一一对应，ids 数量不得超过 MAX_BATCH_SIZE
    async fn get_many(&self, collection: Collection, ids: &[String])
    -> Result<Vec<Option<Document>>>;
    // 按字段过滤集合，不保证顺序
    async fn find(&self, collection: Collection, filter: &FieldFilter) -> Result<Vec<Document>>;

    /// 写入方法
    // 新建文档，ID 由存储生成
    async fn insert(&self, collection: Collection, data: DocumentData) -> Result<Document>;
    // 合并写入，文档不存在时创建
    async fn set_merge(
        &self,
        collection: Collection,
        id: &str,
        data: DocumentData,
    ) -> Result<Document>;
    // 合并更新已存在的文档，不存在时返回 None
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        patch: DocumentData,
    ) -> Result<Option<Document>>;
    // 删除文档
    async fn delete(&self, collection: Collection, id: &str) -> Result<bool>;

    /// 数组原子操作，文档不存在时返回 None
    // 添加不存在的值
    async fn array_union(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<ArrayMutation>>;
    // 移除值
    async fn array_remove(
        &self,
        collection: Collection,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<ArrayMutation>>;
}

/// 根据连接 URL 打开一个后端
async fn open_backend(
    url: &str,
    config: &DatabaseConfig,
    kind: BackendKind,
) -> Result<Arc<dyn DocumentBackend>> {
    if url.starts_with("memory://") {
        return Ok(Arc::new(MemoryBackend::new(kind)));
    }
    let backend = SeaOrmBackend::connect(url, config, kind).await?;
    Ok(Arc::new(backend))
}

/// 创建存储后端
///
/// 配置了特权凭据且连接成功时使用特权连接，否则使用带访问规则的受限连接。
/// 选择只在启动时进行一次，之后的调用失败不会触发切换。
pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn DocumentBackend>> {
    if config.has_admin_credentials() {
        match open_backend(&config.admin_url, config, BackendKind::Privileged).await {
            Ok(backend) => {
                warn!("Using privileged backend connection");
                return Ok(backend);
            }
            Err(e) => {
                warn!(
                    "Failed to open privileged backend connection: {}, falling back to constrained connection",
                    e
                );
            }
        }
    } else {
        warn!("Privileged credentials not configured, using constrained backend connection");
    }

    let rules = AccessRules::from_config(&config.rules)?;
    let inner = open_backend(&config.client_url, config, BackendKind::Constrained).await?;
    Ok(Arc::new(ConstrainedBackend::new(inner, rules)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessRulesConfig;

    fn db_config(admin_url: &str, client_url: &str) -> DatabaseConfig {
        DatabaseConfig {
            admin_url: admin_url.to_string(),
            client_url: client_url.to_string(),
            pool_size: 1,
            timeout: 5,
            rules: AccessRulesConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_privileged_when_credentials_present() {
        let backend = create_storage(&db_config("memory://admin", "memory://client"))
            .await
            .unwrap();
        assert_eq!(backend.kind(), BackendKind::Privileged);
    }

    #[tokio::test]
    async fn test_constrained_without_credentials() {
        let backend = create_storage(&db_config("", "memory://client"))
            .await
            .unwrap();
        assert_eq!(backend.kind(), BackendKind::Constrained);
    }

    #[tokio::test]
    async fn test_fallback_when_privileged_connection_fails() {
        let backend = create_storage(&db_config("not-a-database-url", "memory://client"))
            .await
            .unwrap();
        assert_eq!(backend.kind(), BackendKind::Constrained);
    }

    #[tokio::test]
    async fn test_invalid_rules_are_rejected() {
        let mut config = db_config("", "memory://client");
        config.rules.classes = vec!["read".into(), "teleport".into()];
        assert!(create_storage(&config).await.is_err());
    }
}
