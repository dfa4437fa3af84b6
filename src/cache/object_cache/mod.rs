mod moka;
mod redis;

pub use self::moka::MokaCacheWrapper;
pub use self::redis::RedisObjectCache;
