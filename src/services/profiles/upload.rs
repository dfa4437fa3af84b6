//! 头像上传
//!
//! 图片以 `data:{mime};base64,...` 的形式直接写入用户资料，不落盘。

use actix_multipart::Multipart;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use tracing::info;

use super::ProfileService;
use crate::errors::{AttendlyError, Result};
use crate::models::profiles::responses::UploadedPictureResponse;
use crate::utils::{detect_image_mime, require_non_blank};

/// 解析后的上传内容
#[derive(Debug, Clone, Default)]
pub struct PictureUpload {
    pub user_id: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

fn size_exceeded(max_size: usize) -> AttendlyError {
    AttendlyError::bad_input(format!(
        "File size must be less than {} KB",
        max_size / 1024
    ))
}

/// 读取 multipart 表单中的 `userId` 与 `file` 字段
pub async fn read_picture_upload(mut payload: Multipart, max_size: usize) -> Result<PictureUpload> {
    let mut upload = PictureUpload::default();
    let mut file_seen = false;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AttendlyError::bad_input(format!("Invalid multipart payload: {e}")))?
    {
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        match name.as_str() {
            "userId" => {
                let mut raw = Vec::new();
                while let Some(chunk) = field.next().await {
                    let data = chunk.map_err(|e| {
                        AttendlyError::bad_input(format!("Failed to read userId: {e}"))
                    })?;
                    raw.extend_from_slice(&data);
                }
                upload.user_id = String::from_utf8(raw)
                    .map_err(|_| AttendlyError::bad_input("userId must be valid UTF-8"))?;
            }
            "file" => {
                if file_seen {
                    return Err(AttendlyError::bad_input(
                        "Only one file can be uploaded at a time",
                    ));
                }
                file_seen = true;

                upload.content_type = field
                    .content_type()
                    .map(|ct| ct.to_string())
                    .unwrap_or_default();
                if !upload.content_type.starts_with("image/") {
                    return Err(AttendlyError::bad_input("File must be an image"));
                }

                while let Some(chunk) = field.next().await {
                    let data = chunk.map_err(|e| {
                        AttendlyError::bad_input(format!("Failed to read file: {e}"))
                    })?;
                    if upload.bytes.len() + data.len() > max_size {
                        return Err(size_exceeded(max_size));
                    }
                    upload.bytes.extend_from_slice(&data);
                }
            }
            // 其他字段忽略
            _ => {}
        }
    }

    if !file_seen || upload.user_id.trim().is_empty() {
        return Err(AttendlyError::bad_input("File and userId are required"));
    }
    Ok(upload)
}

/// 校验图片并写入用户资料
pub async fn store_picture(
    service: &ProfileService,
    upload: PictureUpload,
) -> Result<UploadedPictureResponse> {
    let user_id = require_non_blank(&upload.user_id, "File and userId are required")?;

    if !upload.content_type.starts_with("image/") {
        return Err(AttendlyError::bad_input("File must be an image"));
    }
    let max_size = service.upload.max_image_size;
    if upload.bytes.len() > max_size {
        return Err(size_exceeded(max_size));
    }
    let mime = detect_image_mime(&upload.bytes).ok_or_else(|| {
        AttendlyError::bad_input("File content is not a recognized image format")
    })?;

    let image_url = format!("data:{};base64,{}", mime, STANDARD.encode(&upload.bytes));
    service.profiles.set_picture(user_id, &image_url).await?;
    info!(
        "Profile picture stored for {} ({} bytes, {})",
        user_id,
        upload.bytes.len(),
        mime
    );

    Ok(UploadedPictureResponse {
        user_id: user_id.to_string(),
        image_url,
    })
}
