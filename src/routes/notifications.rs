use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::NotificationService;
use crate::utils::{SafeIDI64, SafeUserIdI64};

static NOTIFICATION_SERVICE: Lazy<NotificationService> =
    Lazy::new(NotificationService::new_lazy);

pub async fn list_notifications(
    req: HttpRequest,
    user_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.list(&req, user_id.0, false).await
}

pub async fn list_unread_notifications(
    req: HttpRequest,
    user_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.list(&req, user_id.0, true).await
}

pub async fn unread_count(req: HttpRequest, user_id: SafeUserIdI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.unread_count(&req, user_id.0).await
}

pub async fn mark_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_read(&req, id.0).await
}

// 本人或管理员，由服务层校验
pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notifications")
            .wrap(middlewares::RequireJWT)
            .route("/user/{user_id}", web::get().to(list_notifications))
            .route("/unread/{user_id}", web::get().to(list_unread_notifications))
            .route("/unread-count/{user_id}", web::get().to(unread_count))
            .route("/read/{id}", web::put().to(mark_read)),
    );
}
