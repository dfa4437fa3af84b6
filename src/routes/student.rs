use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::models::ApiResponse;
use crate::models::classes::requests::{JoinClassRequest, MemberClassesQuery, RosterMemberRequest};
use crate::models::classes::responses::MemberClassListResponse;
use crate::models::common::error_response;
use crate::services::Services;

pub async fn list_classes(
    services: web::Data<Services>,
    query: web::Query<MemberClassesQuery>,
) -> ActixResult<HttpResponse> {
    match services
        .classes
        .list_member_classes(query.student_id.as_deref())
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MemberClassListResponse { items },
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to fetch classes")),
    }
}

pub async fn join_class(
    services: web::Data<Services>,
    body: web::Json<JoinClassRequest>,
) -> ActixResult<HttpResponse> {
    match services
        .roster
        .join(&body.student_id, &body.invitation_code)
        .await
    {
        Ok(joined) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            joined,
            "Successfully joined class",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to join class")),
    }
}

pub async fn leave_class(
    services: web::Data<Services>,
    class_id: web::Path<String>,
    body: web::Json<RosterMemberRequest>,
) -> ActixResult<HttpResponse> {
    match services.roster.leave(&class_id, &body.student_id).await {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Successfully left class",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to leave class")),
    }
}

// 配置路由
pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/student/classes")
            .service(
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(join_class)),
            )
            .service(web::resource("/{class_id}").route(web::delete().to(leave_class))),
    );
}
