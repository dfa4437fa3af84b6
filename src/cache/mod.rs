//! 对象缓存
//!
//! 缓存值统一以 JSON 字符串保存，读取失败或反序列化失败均视为未命中。

pub mod object_cache;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

pub use object_cache::{MokaCacheWrapper, RedisObjectCache};

/// 缓存读取结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    // 缓存后端出错，无法确定是否存在
    ExistsButNoValue,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    // ttl 为 0 时使用配置的默认值
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
}

/// 读取并反序列化缓存值，格式不符的条目会被移除
pub async fn get_json<T: DeserializeOwned>(cache: &dyn ObjectCache, key: &str) -> Option<T> {
    match cache.get_raw(key).await {
        CacheResult::Found(json) => match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Discarding malformed cache entry {}: {}", key, e);
                cache.remove(key).await;
                None
            }
        },
        _ => None,
    }
}

/// 序列化后写入缓存
pub async fn insert_json<T: Serialize>(cache: &dyn ObjectCache, key: String, value: &T) {
    match serde_json::to_string(value) {
        Ok(json) => cache.insert_raw(key, json, 0).await,
        Err(e) => debug!("Skipping cache insert for {}: {}", key, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;

    #[tokio::test]
    async fn test_json_helpers() {
        let cache = MokaCacheWrapper::new(&CacheConfig::default());
        insert_json(&cache, "profile:u1".into(), &vec!["a", "b"]).await;
        let value: Option<Vec<String>> = get_json(&cache, "profile:u1").await;
        assert_eq!(value, Some(vec!["a".to_string(), "b".to_string()]));

        cache
            .insert_raw("profile:u2".into(), "{not json".into(), 0)
            .await;
        let broken: Option<Vec<String>> = get_json(&cache, "profile:u2").await;
        assert!(broken.is_none());
        assert_eq!(cache.get_raw("profile:u2").await, CacheResult::NotFound);
    }
}
