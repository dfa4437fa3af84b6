use std::sync::Arc;

use tracing::warn;

use crate::cache::{MokaCacheWrapper, ObjectCache, RedisObjectCache};
use crate::config::{AppConfig, CacheConfig};
use crate::errors::{AttendlyError, Result};
use crate::services::Services;
use crate::storage::BackendKind;

pub struct StartupContext {
    pub services: Services,
}

/// 创建缓存实例，Redis 不可用或类型未知时回退到内存缓存
pub fn create_cache(config: &CacheConfig) -> Arc<dyn ObjectCache> {
    warn!("Attempting to create {} cache backend", config.cache_type);

    match config.cache_type.as_str() {
        "moka" => {}
        "redis" => match RedisObjectCache::new(config) {
            Ok(cache) => {
                warn!("Successfully created redis cache backend");
                return Arc::new(cache);
            }
            Err(e) => {
                warn!("Failed to create redis cache: {}", e);
                warn!("Falling back to memory cache");
            }
        },
        other => {
            warn!(
                "Cache backend '{}' is not supported, falling back to memory cache",
                other
            );
        }
    }

    Arc::new(MokaCacheWrapper::new(config))
}

/// 准备服务器启动的上下文
/// 包括存储、缓存和业务服务
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| AttendlyError::backend_config("Failed to install rustls crypto provider"))?;

    let storage = crate::storage::create_storage(&config.database).await?;
    match storage.kind() {
        BackendKind::Privileged => warn!("Storage backend initialized (privileged connection)"),
        BackendKind::Constrained => {
            warn!("Storage backend initialized (constrained connection, access rules enforced)")
        }
    }

    let cache = create_cache(&config.cache);
    warn!("Cache backend initialized");

    let services = Services::new(storage, cache, config.upload.clone());

    Ok(StartupContext { services })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheResult;

    #[tokio::test]
    async fn test_unknown_cache_type_falls_back() {
        let config = CacheConfig {
            cache_type: "memcached".into(),
            ..Default::default()
        };
        let cache = create_cache(&config);
        cache.insert_raw("k".into(), "v".into(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("v".into()));
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back() {
        let mut config = CacheConfig {
            cache_type: "redis".into(),
            ..Default::default()
        };
        config.redis.url = "redis://127.0.0.1:1/".into();
        let cache = create_cache(&config);
        cache.insert_raw("k".into(), "v".into(), 0).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::Found("v".into()));
    }
}
