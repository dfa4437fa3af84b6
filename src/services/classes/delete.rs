use tracing::info;

use super::{ClassService, invitation_cache_key};
use crate::errors::{AttendlyError, Result};

/// 删除班级并清理邀请码缓存
pub async fn delete_class(service: &ClassService, class_id: &str) -> Result<()> {
    let class = service
        .classes()
        .get(class_id)
        .await?
        .ok_or_else(|| AttendlyError::not_found("Class not found"))?;

    if !service.classes().delete(class_id).await? {
        return Err(AttendlyError::not_found("Class not found"));
    }

    service
        .cache()
        .remove(&invitation_cache_key(&class.class_code))
        .await;
    info!("Class {} deleted, code {} released", class.id, class.class_code);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{class_service, new_class};
    use super::*;
    use crate::errors::Severity;

    #[tokio::test]
    async fn test_delete_invalidates_code() {
        let service = class_service();
        let class = service.create_class(new_class("t1", "CS", "A")).await.unwrap();
        // 预热缓存
        service.resolve_by_code(&class.class_code).await.unwrap();

        service.delete_class(&class.id).await.unwrap();
        let err = service.resolve_by_code(&class.class_code).await.unwrap_err();
        assert_eq!(err.severity(), Severity::NotFound);

        let err = service.delete_class(&class.id).await.unwrap_err();
        assert_eq!(err.severity(), Severity::NotFound);
    }
}
