use actix_web::{HttpResponse, Result as ActixResult, web};

use crate::models::ApiResponse;
use crate::models::classes::requests::{
    CreateClassRequest, OwnerClassesQuery, RosterMemberRequest, UpdateClassRequest,
};
use crate::models::classes::responses::ClassListResponse;
use crate::models::common::error_response;
use crate::services::Services;

pub async fn list_classes(
    services: web::Data<Services>,
    query: web::Query<OwnerClassesQuery>,
) -> ActixResult<HttpResponse> {
    match services
        .classes
        .list_owner_classes(query.teacher_id.as_deref())
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ClassListResponse { items },
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to fetch classes")),
    }
}

pub async fn create_class(
    services: web::Data<Services>,
    body: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    match services.classes.create_class(body.into_inner()).await {
        Ok(class) => Ok(HttpResponse::Created().json(ApiResponse::success(
            class,
            "Class created successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to create class")),
    }
}

pub async fn update_class(
    services: web::Data<Services>,
    class_id: web::Path<String>,
    body: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    match services
        .classes
        .update_class(&class_id, body.into_inner())
        .await
    {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Class updated successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to update class")),
    }
}

pub async fn delete_class(
    services: web::Data<Services>,
    class_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    match services.classes.delete_class(&class_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Class deleted successfully",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to delete class")),
    }
}

pub async fn remove_student(
    services: web::Data<Services>,
    class_id: web::Path<String>,
    body: web::Json<RosterMemberRequest>,
) -> ActixResult<HttpResponse> {
    match services
        .roster
        .remove_member(&class_id, &body.student_id)
        .await
    {
        Ok(class) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            class,
            "Student removed from class",
        ))),
        Err(e) => Ok(error_response(&e, "Failed to remove student")),
    }
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/teacher/classes")
            .service(
                web::resource("")
                    .route(web::get().to(list_classes))
                    .route(web::post().to(create_class)),
            )
            .service(
                web::resource("/{class_id}")
                    .route(web::put().to(update_class))
                    .route(web::delete().to(delete_class)),
            )
            .service(
                web::resource("/{class_id}/students").route(web::delete().to(remove_student)),
            ),
    );
}
