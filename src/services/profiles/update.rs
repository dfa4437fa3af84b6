use tracing::info;

use super::ProfileService;
use crate::errors::{AttendlyError, Result};
use crate::models::profiles::entities::ProfileRecord;
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::utils::{require_non_blank, validate_email};

pub async fn update_profile(
    service: &ProfileService,
    user_id: &str,
    request: UpdateProfileRequest,
) -> Result<ProfileRecord> {
    let user_id = require_non_blank(user_id, "User ID is required")?;

    if let Some(email) = request.email.as_deref()
        && !email.is_empty()
    {
        validate_email(email).map_err(AttendlyError::bad_input)?;
    }

    let profile = service.profiles.upsert(user_id, &request).await?;
    info!("Profile {} updated", user_id);
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::profile_service;
    use super::*;
    use crate::errors::Severity;
    use crate::models::profiles::entities::UserRole;

    #[tokio::test]
    async fn test_update_merges_fields() {
        let service = profile_service();
        service
            .update_profile(
                "u1",
                UpdateProfileRequest {
                    display_name: Some("Grace".into()),
                    role: Some(UserRole::Teacher),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let profile = service
            .update_profile(
                "u1",
                UpdateProfileRequest {
                    teacher_id: Some("T-042".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.display_name, "Grace");
        assert_eq!(profile.role, UserRole::Teacher);
        assert_eq!(profile.teacher_id, "T-042");
        assert_eq!(service.get_profile("u1").await.unwrap(), profile);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let service = profile_service();
        let err = service
            .update_profile(
                "u1",
                UpdateProfileRequest {
                    email: Some("grace@".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.severity(), Severity::BadInput);
    }
}
