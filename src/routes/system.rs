use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::AppStartTime;
use crate::models::system::responses::SystemStatusResponse;
use crate::services::Services;

pub async fn get_status(
    services: web::Data<Services>,
    start_time: web::Data<AppStartTime>,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let now = chrono::Utc::now();

    let status = SystemStatusResponse {
        name: config.app.system_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: config.app.environment.clone(),
        backend: services.backend_kind.as_str().to_string(),
        cache_type: config.cache.cache_type.clone(),
        started_at: start_time.start_datetime,
        uptime_seconds: now
            .signed_duration_since(start_time.start_datetime)
            .num_seconds(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(status, "System is running")))
}

// 配置路由
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/system").route("/status", web::get().to(get_status)));
}
