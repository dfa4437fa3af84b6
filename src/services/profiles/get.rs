use super::ProfileService;
use crate::errors::Result;
use crate::models::profiles::entities::ProfileRecord;
use crate::utils::require_non_blank;

pub async fn get_profile(service: &ProfileService, user_id: &str) -> Result<ProfileRecord> {
    let user_id = require_non_blank(user_id, "User ID is required")?;

    Ok(service
        .profiles
        .get(user_id)
        .await?
        .unwrap_or_else(|| ProfileRecord::empty(user_id)))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::profile_service;
    use crate::errors::Severity;

    #[tokio::test]
    async fn test_missing_profile_is_empty() {
        let service = profile_service();
        let profile = service.get_profile("u1").await.unwrap();
        assert_eq!(profile.id, "u1");
        assert!(profile.display_name.is_empty());
        assert!(profile.created_at.is_none());
    }

    #[tokio::test]
    async fn test_blank_id_rejected() {
        let service = profile_service();
        let err = service.get_profile(" ").await.unwrap_err();
        assert_eq!(err.severity(), Severity::BadInput);
    }
}
