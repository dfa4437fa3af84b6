use tracing::debug;

use super::ClassService;
use crate::errors::{AttendlyError, Result};
use crate::models::classes::entities::{ClassRecord, MemberClass};

/// 找不到教师资料时使用的名称
const FALLBACK_TEACHER_NAME: &str = "Teacher";

pub async fn list_owner_classes(
    service: &ClassService,
    teacher_id: Option<&str>,
) -> Result<Vec<ClassRecord>> {
    let teacher_id = teacher_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AttendlyError::bad_input("Teacher ID is required"))?;

    service.classes().list_by_teacher(teacher_id).await
}

pub async fn list_member_classes(
    service: &ClassService,
    student_id: Option<&str>,
) -> Result<Vec<MemberClass>> {
    let student_id = student_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AttendlyError::bad_input("Student ID is required"))?;

    let classes = service.classes().list_by_member(student_id).await?;
    let mut result = Vec::with_capacity(classes.len());
    for class in classes {
        let teacher_name = teacher_display_name(service, &class.teacher_id).await;
        result.push(MemberClass {
            class,
            teacher_name,
        });
    }
    Ok(result)
}

/// 教师资料读取失败不影响列表
async fn teacher_display_name(service: &ClassService, teacher_id: &str) -> String {
    match service.profiles.get(teacher_id).await {
        Ok(Some(profile)) if !profile.display_name.is_empty() => profile.display_name,
        Ok(_) => FALLBACK_TEACHER_NAME.to_string(),
        Err(e) => {
            debug!("Failed to load teacher profile {}: {}", teacher_id, e);
            FALLBACK_TEACHER_NAME.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{class_service, new_class};
    use super::*;
    use crate::errors::Severity;
    use crate::models::profiles::requests::UpdateProfileRequest;

    #[tokio::test]
    async fn test_member_classes_carry_teacher_name() {
        let service = class_service();
        service
            .profiles
            .upsert(
                "t1",
                &UpdateProfileRequest {
                    display_name: Some("Dr. Hopper".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let named = service.create_class(new_class("t1", "CS", "A")).await.unwrap();
        let unnamed = service.create_class(new_class("t2", "Math", "B")).await.unwrap();
        service.classes().add_member(&named.id, "u1").await.unwrap();
        service.classes().add_member(&unnamed.id, "u1").await.unwrap();

        let classes = service.list_member_classes(Some("u1")).await.unwrap();
        assert_eq!(classes.len(), 2);
        // 最新创建的在前
        assert_eq!(classes[0].class.id, unnamed.id);
        assert_eq!(classes[0].teacher_name, "Teacher");
        assert_eq!(classes[1].teacher_name, "Dr. Hopper");
    }

    #[tokio::test]
    async fn test_missing_ids_rejected() {
        let service = class_service();
        let err = service.list_owner_classes(None).await.unwrap_err();
        assert_eq!(err.severity(), Severity::BadInput);
        let err = service.list_member_classes(Some(" ")).await.unwrap_err();
        assert_eq!(err.severity(), Severity::BadInput);
    }

    #[tokio::test]
    async fn test_owner_without_classes() {
        let service = class_service();
        assert!(service.list_owner_classes(Some("t9")).await.unwrap().is_empty());
    }
}
