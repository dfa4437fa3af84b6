use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::models::ApiResponse;
use crate::models::common::error_response;
use crate::services::Services;

// 通过邀请码查询班级公开信息
pub async fn lookup_class(
    services: web::Data<Services>,
    code: web::Path<String>,
) -> ActixResult<HttpResponse> {
    match services.classes.lookup_class(&code).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary, "Class found"))),
        Err(e) => Ok(error_response(&e, "Failed to lookup class")),
    }
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .service(web::resource("/lookup/{code}").route(web::get().to(lookup_class))),
    );
}
