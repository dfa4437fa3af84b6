pub mod batch;
pub mod delete;
pub mod get;
pub mod update;
pub mod upload;

use actix_multipart::Multipart;

use crate::config::UploadConfig;
use crate::errors::Result;
use crate::models::profiles::entities::ProfileRecord;
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::models::profiles::responses::UploadedPictureResponse;
use crate::storage::ProfileStore;

#[derive(Clone)]
pub struct ProfileService {
    profiles: ProfileStore,
    upload: UploadConfig,
}

impl ProfileService {
    pub fn new(profiles: ProfileStore, upload: UploadConfig) -> Self {
        Self { profiles, upload }
    }

    // 获取用户资料，不存在时返回空资料
    pub async fn get_profile(&self, user_id: &str) -> Result<ProfileRecord> {
        get::get_profile(self, user_id).await
    }

    // 合并更新用户资料
    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<ProfileRecord> {
        update::update_profile(self, user_id, request).await
    }

    // 删除用户资料
    pub async fn delete_profile(&self, user_id: &str) -> Result<()> {
        delete::delete_profile(self, user_id).await
    }

    // 清除头像
    pub async fn remove_picture(&self, user_id: &str) -> Result<ProfileRecord> {
        delete::remove_picture(self, user_id).await
    }

    // 批量获取用户资料
    pub async fn get_profiles(&self, user_ids: &[String]) -> Result<Vec<ProfileRecord>> {
        batch::get_profiles(self, user_ids).await
    }

    // 上传头像
    pub async fn upload_picture(&self, payload: Multipart) -> Result<UploadedPictureResponse> {
        let upload = upload::read_picture_upload(payload, self.upload.max_image_size).await?;
        upload::store_picture(self, upload).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::cache::MokaCacheWrapper;
    use crate::config::CacheConfig;
    use crate::storage::MemoryBackend;
    use std::sync::Arc;

    pub fn profile_service_with(backend: Arc<MemoryBackend>) -> ProfileService {
        ProfileService::new(
            ProfileStore::new(
                backend,
                Arc::new(MokaCacheWrapper::new(&CacheConfig::default())),
            ),
            UploadConfig::default(),
        )
    }

    pub fn profile_service() -> ProfileService {
        profile_service_with(Arc::new(MemoryBackend::default()))
    }
}
