pub mod classes;

pub mod student;

pub mod teacher;

pub mod profiles;

pub mod system;

pub use classes::configure_classes_routes;
pub use profiles::configure_profile_routes;
pub use student::configure_student_routes;
pub use system::configure_system_routes;
pub use teacher::configure_teacher_routes;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_classes_routes)
        .configure(configure_student_routes)
        .configure(configure_teacher_routes)
        .configure(configure_profile_routes)
        .configure(configure_system_routes);
}
