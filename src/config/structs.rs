use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub cors: CorsConfig,
    pub upload: UploadConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub unix_socket_path: String,
    pub workers: usize,
    pub max_workers: usize,
    pub timeouts: TimeoutConfig,
    pub limits: LimitConfig,
}

/// 超时配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub client_request: u64,
    pub client_disconnect: u64,
    pub keep_alive: u64,
}

/// 限制配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    pub max_payload_size: usize,
}

/// 数据库配置
///
/// `admin_url` 携带服务端持有的特权凭据，为空表示未配置；
/// 此时使用受限的 `client_url` 并应用 `rules` 中的访问规则。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub admin_url: String,
    pub client_url: String, // 受限连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32,     // 连接池大小
    pub timeout: u64,       // 连接超时 (秒)
    #[serde(default)]
    pub rules: AccessRulesConfig,
}

impl DatabaseConfig {
    /// 是否配置了特权凭据
    pub fn has_admin_credentials(&self) -> bool {
        !self.admin_url.trim().is_empty()
    }
}

/// 受限连接的访问规则，按集合列出允许的操作
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRulesConfig {
    #[serde(default = "all_operations")]
    pub classes: Vec<String>,
    #[serde(default = "all_operations")]
    pub user_profiles: Vec<String>,
}

fn all_operations() -> Vec<String> {
    vec!["read".into(), "write".into(), "delete".into()]
}

impl Default for AccessRulesConfig {
    fn default() -> Self {
        Self {
            classes: all_operations(),
            user_profiles: all_operations(),
        }
    }
}

/// 缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub default_ttl: u64,
    pub redis: RedisConfig,
    pub memory: MemoryConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_type: "moka".to_string(),
            default_ttl: 300,
            redis: RedisConfig::default(),
            memory: MemoryConfig::default(),
        }
    }
}

/// Redis 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: "attendly:".to_string(),
        }
    }
}

/// 内存缓存配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    pub max_capacity: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
        }
    }
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    pub max_age: usize,
}

/// 头像上传配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_image_size: usize, // 内嵌存储的单张图片最大字节数
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_image_size: 2 * 1024 * 1024,
        }
    }
}
