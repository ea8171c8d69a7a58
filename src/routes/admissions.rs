use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::admissions::requests::{
    AdmissionListQuery, ApplyAdmissionRequest, CheckAdmissionStatusQuery,
    UpdateAdmissionStatusRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AdmissionService;
use crate::utils::SafeIDI64;

static ADMISSION_SERVICE: Lazy<AdmissionService> = Lazy::new(AdmissionService::new_lazy);

pub async fn apply(
    req: HttpRequest,
    body: web::Json<ApplyAdmissionRequest>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.apply(&req, body.into_inner()).await
}

pub async fn check_status(
    req: HttpRequest,
    query: web::Query<CheckAdmissionStatusQuery>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .check_status(&req, query.into_inner())
        .await
}

pub async fn list_admissions(
    req: HttpRequest,
    query: web::Query<AdmissionListQuery>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.list(&req, query.into_inner()).await
}

pub async fn get_admission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.get(&req, id.0).await
}

pub async fn update_admission(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAdmissionStatusRequest>,
) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE
        .update_status(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_admission(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ADMISSION_SERVICE.delete(&req, id.0).await
}

// 配置路由
pub fn configure_admission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admission")
            // 公开接口，仅限流
            .service(
                web::resource("/apply")
                    .wrap(middlewares::RateLimit::admission_apply())
                    .route(web::post().to(apply)),
            )
            .service(
                web::resource("/check-status")
                    .wrap(middlewares::RateLimit::admission_status())
                    .route(web::get().to(check_status)),
            )
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .wrap(middlewares::RequireJWT)
                    .route("/all", web::get().to(list_admissions))
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_admission))
                            .route(web::put().to(update_admission))
                            .route(web::delete().to(delete_admission)),
                    )
                    .route("/{id}/status", web::put().to(update_admission)),
            ),
    );
}
