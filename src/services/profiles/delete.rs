use tracing::info;

use super::ProfileService;
use crate::errors::{AttendlyError, Result};
use crate::models::profiles::entities::ProfileRecord;
use crate::utils::require_non_blank;

pub async fn delete_profile(service: &ProfileService, user_id: &str) -> Result<()> {
    let user_id = require_non_blank(user_id, "User ID is required")?;

    if !service.profiles.delete(user_id).await? {
        return Err(AttendlyError::not_found("Profile not found"));
    }
    info!("Profile {} deleted", user_id);
    Ok(())
}

pub async fn remove_picture(service: &ProfileService, user_id: &str) -> Result<ProfileRecord> {
    let user_id = require_non_blank(user_id, "User ID is required")?;

    let profile = service
        .profiles
        .clear_picture(user_id)
        .await?
        .ok_or_else(|| AttendlyError::not_found("Profile not found"))?;
    info!("Profile picture removed for {}", user_id);
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::profile_service;
    use crate::errors::Severity;
    use crate::models::profiles::requests::UpdateProfileRequest;

    #[tokio::test]
    async fn test_delete_profile() {
        let service = profile_service();
        service
            .update_profile(
                "u1",
                UpdateProfileRequest {
                    display_name: Some("Ada".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        service.delete_profile("u1").await.unwrap();
        assert!(service.get_profile("u1").await.unwrap().display_name.is_empty());

        let err = service.delete_profile("u1").await.unwrap_err();
        assert_eq!(err.severity(), Severity::NotFound);
    }

    #[tokio::test]
    async fn test_remove_picture() {
        let service = profile_service();
        let err = service.remove_picture("u1").await.unwrap_err();
        assert_eq!(err.severity(), Severity::NotFound);

        service
            .update_profile(
                "u1",
                UpdateProfileRequest {
                    profile_picture: Some("https://img.example/ada.png".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let profile = service.remove_picture("u1").await.unwrap();
        assert!(profile.profile_picture.is_empty());
    }
}
