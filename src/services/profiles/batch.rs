use super::ProfileService;
use crate::errors::{AttendlyError, Result};
use crate::models::profiles::entities::ProfileRecord;

/// 批量获取用户资料，缺失的资料以占位显示名补齐
pub async fn get_profiles(
    service: &ProfileService,
    user_ids: &[String],
) -> Result<Vec<ProfileRecord>> {
    if user_ids.is_empty() {
        return Err(AttendlyError::bad_input("User IDs array is required"));
    }

    let found = service.profiles.get_many(user_ids).await?;
    Ok(user_ids
        .iter()
        .zip(found)
        .map(|(user_id, profile)| profile.unwrap_or_else(|| ProfileRecord::placeholder(user_id)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{profile_service, profile_service_with};
    use crate::errors::Severity;
    use crate::models::profiles::requests::UpdateProfileRequest;
    use crate::storage::{MAX_BATCH_SIZE, MemoryBackend};
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_unknown_ids_get_placeholders_in_order() {
        let service = profile_service();
        let ids: Vec<String> = vec!["zeta-0001-x".into(), "alpha".into(), "m".into()];
        let profiles = service.get_profiles(&ids).await.unwrap();

        let names: Vec<_> = profiles.iter().map(|p| p.display_name.as_str()).collect();
        assert_eq!(names, vec!["User zeta-000", "User alpha", "User m"]);
        let returned: Vec<_> = profiles.iter().map(|p| p.id.clone()).collect();
        assert_eq!(returned, ids);
    }

    #[tokio::test]
    async fn test_mixed_batch_uses_bounded_requests() {
        let backend = Arc::new(MemoryBackend::default());
        let service = profile_service_with(backend.clone());
        service
            .update_profile(
                "u12",
                UpdateProfileRequest {
                    display_name: Some("Linus".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let ids: Vec<String> = (0..21).map(|i| format!("u{i}")).collect();
        let profiles = service.get_profiles(&ids).await.unwrap();

        assert_eq!(profiles.len(), 21);
        assert_eq!(profiles[12].display_name, "Linus");
        assert_eq!(profiles[13].display_name, "User u13");
        assert_eq!(backend.get_many_calls.load(Ordering::Relaxed), 3);
        assert!(backend.largest_batch.load(Ordering::Relaxed) <= MAX_BATCH_SIZE);
    }

    #[tokio::test]
    async fn test_empty_request_rejected() {
        let service = profile_service();
        let err = service.get_profiles(&[]).await.unwrap_err();
        assert_eq!(err.severity(), Severity::BadInput);
    }
}
