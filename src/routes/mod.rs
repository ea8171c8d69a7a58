pub mod admissions;
pub mod attendance;
pub mod auth;
pub mod frontend;
pub mod notifications;
pub mod results;
pub mod student_management;
pub mod teacher_management;
pub mod users;

pub use admissions::configure_admission_routes;
pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use frontend::configure_frontend_routes;
pub use notifications::configure_notification_routes;
pub use results::configure_result_routes;
pub use student_management::configure_student_management_routes;
pub use teacher_management::configure_teacher_management_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由；前端兜底路由必须最后注册
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_attendance_routes)
        .configure(configure_result_routes)
        .configure(configure_student_management_routes)
        .configure(configure_teacher_management_routes)
        .configure(configure_admission_routes)
        .configure(configure_notification_routes);
}
