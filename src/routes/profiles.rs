use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::models::ApiResponse;
use crate::models::common::error_response;
use crate::models::profiles::requests::{BatchProfilesRequest, UpdateProfileRequest};
use crate::models::profiles::responses::ProfileListResponse;
use crate::services::Services;

pub async fn get_profile(
    services: web::Data<Services>,
    user_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    match services.profiles.get_profile(&user_id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Profile retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to fetch profile")),
    }
}

pub async fn update_profile(
    services: web::Data<Services>,
    user_id: web::Path<String>,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    match services
        .profiles
        .update_profile(&user_id, body.into_inner())
        .await
    {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Profile updated successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to update profile")),
    }
}

pub async fn delete_profile(
    services: web::Data<Services>,
    user_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    match services.profiles.delete_profile(&user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Profile deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to delete profile")),
    }
}

pub async fn remove_picture(
    services: web::Data<Services>,
    user_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    match services.profiles.remove_picture(&user_id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Profile picture removed successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to remove profile picture")),
    }
}

pub async fn get_profiles(
    services: web::Data<Services>,
    body: web::Json<BatchProfilesRequest>,
) -> ActixResult<HttpResponse> {
    match services.profiles.get_profiles(&body.user_ids).await {
        Ok(profiles) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProfileListResponse { profiles },
            "Profiles retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to fetch profiles")),
    }
}

pub async fn upload_picture(
    services: web::Data<Services>,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    match services.profiles.upload_picture(payload).await {
        Ok(uploaded) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            uploaded,
            "Profile picture uploaded successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to upload image")),
    }
}

// 配置路由
pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/user")
            // 需在 /profile/{user_id} 之前注册
            .service(web::resource("/profile/upload").route(web::post().to(upload_picture)))
            .service(
                web::resource("/profile/{user_id}")
                    .route(web::get().to(get_profile))
                    .route(web::put().to(update_profile))
                    .route(web::delete().to(delete_profile)),
            )
            .service(
                web::resource("/profile/{user_id}/picture")
                    .route(web::delete().to(remove_picture)),
            )
            .service(web::resource("/profiles").route(web::post().to(get_profiles))),
    );
}
