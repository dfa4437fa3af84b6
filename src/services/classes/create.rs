use tracing::info;

use super::ClassService;
use crate::errors::{AttendlyError, Result};
use crate::models::classes::entities::ClassRecord;
use crate::models::classes::requests::CreateClassRequest;

pub async fn create_class(
    service: &ClassService,
    request: CreateClassRequest,
) -> Result<ClassRecord> {
    let required = [
        &request.teacher_id,
        &request.class_name,
        &request.subject,
        &request.section,
    ];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(AttendlyError::bad_input(
            "Missing required fields: teacherId, className, subject and section are required",
        ));
    }

    let class = service.classes().create(&request).await?;
    info!(
        "Class {} created by teacher {} with code {}",
        class.id, class.teacher_id, class.class_code
    );
    Ok(class)
}
