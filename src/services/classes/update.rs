use tracing::info;

use super::ClassService;
use crate::errors::{AttendlyError, Result};
use crate::models::classes::entities::ClassRecord;
use crate::models::classes::requests::UpdateClassRequest;

pub async fn update_class(
    service: &ClassService,
    class_id: &str,
    request: UpdateClassRequest,
) -> Result<ClassRecord> {
    if class_id.trim().is_empty() {
        return Err(AttendlyError::bad_input("Class ID is required"));
    }
    if let Some(name) = &request.class_name
        && name.trim().is_empty()
    {
        return Err(AttendlyError::bad_input("Class name cannot be empty"));
    }

    let class = service
        .classes()
        .update_metadata(class_id, &request)
        .await?
        .ok_or_else(|| AttendlyError::not_found("Class not found"))?;

    info!("Class {} metadata updated", class.id);
    Ok(class)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{class_service, new_class};
    use super::*;
    use crate::errors::Severity;

    #[tokio::test]
    async fn test_update_ignores_roster_fields() {
        let service = class_service();
        let class = service.create_class(new_class("t1", "CS", "A")).await.unwrap();
        service.classes().add_member(&class.id, "u1").await.unwrap();

        let request: UpdateClassRequest = serde_json::from_value(serde_json::json!({
            "description": "Moved online",
            "students": [],
            "classCode": "HIJACK",
            "teacherId": "t2",
        }))
        .unwrap();

        let updated = service.update_class(&class.id, request).await.unwrap();
        assert_eq!(updated.description, "Moved online");
        assert_eq!(updated.students, vec!["u1".to_string()]);
        assert_eq!(updated.class_code, class.class_code);
        assert_eq!(updated.teacher_id, "t1");
    }

    #[tokio::test]
    async fn test_update_missing_class() {
        let service = class_service();
        let err = service
            .update_class("missing", UpdateClassRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.severity(), Severity::NotFound);
    }
}
