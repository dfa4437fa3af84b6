use serde::Serialize;

use super::entities::ProfileRecord;

// 批量用户资料响应，顺序与请求一致
#[derive(Debug, Serialize)]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileRecord>,
}

// 头像上传结果
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedPictureResponse {
    pub user_id: String,
    pub image_url: String,
}
