//! 邀请码解析
//!
//! 成功解析后缓存 `class_code:{code}` → 班级ID。命中缓存时会校验班级仍存在且邀请码未变，
//! 否则移除缓存并重新查询。

use tracing::{debug, warn};

use super::ClassService;
use crate::cache;
use crate::errors::{AttendlyError, Result};
use crate::models::classes::entities::ClassRecord;
use crate::utils::require_non_blank;

pub fn invitation_cache_key(code: &str) -> String {
    format!("class_code:{code}")
}

pub async fn resolve_by_code(service: &ClassService, code: &str) -> Result<ClassRecord> {
    let code = require_non_blank(code, "Invitation code is required")?;
    let key = invitation_cache_key(code);

    if let Some(class_id) = cache::get_json::<String>(service.cache(), &key).await {
        match service.classes().get(&class_id).await? {
            Some(class) if class.class_code == code => {
                debug!("Invitation code {} resolved from cache", code);
                return Ok(class);
            }
            _ => {
                debug!("Stale invitation cache entry for {}", code);
                service.cache().remove(&key).await;
            }
        }
    }

    let mut matches = service.classes().find_by_code(code).await?;
    if matches.is_empty() {
        return Err(AttendlyError::not_found("Invalid invitation code"));
    }
    if matches.len() > 1 {
        warn!(
            "Invitation code {} matches {} classes, using the earliest created",
            code,
            matches.len()
        );
    }

    // 按创建时间升序，取最早的
    let class = matches.swap_remove(0);
    cache::insert_json(service.cache(), key, &class.id).await;
    Ok(class)
}
