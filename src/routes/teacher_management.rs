use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::ProfileService;
use crate::utils::SafeIDI64;

static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

pub async fn teacher_profile(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.teacher_profile(&req, id.0).await
}

// 管理员或教师本人，由服务层校验
pub fn configure_teacher_management_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/teachermanagement")
            .wrap(middlewares::RequireJWT)
            .route("/profile/{id}", web::get().to(teacher_profile)),
    );
}
