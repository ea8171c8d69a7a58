use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceStatusQuery, BulkAttendanceRequest, MarkAttendanceRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AttendanceService;
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static ATTENDANCE_SERVICE: Lazy<AttendanceService> = Lazy::new(AttendanceService::new_lazy);

pub async fn mark_attendance(
    req: HttpRequest,
    body: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.mark(&req, body.into_inner()).await
}

pub async fn mark_attendance_bulk(
    req: HttpRequest,
    body: web::Json<BulkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.mark_bulk(&req, body.into_inner()).await
}

pub async fn submission_status(
    req: HttpRequest,
    query: web::Query<AttendanceStatusQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .submission_status(&req, query.into_inner())
        .await
}

pub async fn list_attendance(
    req: HttpRequest,
    query: web::Query<AttendanceListQuery>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.list(&req, query.into_inner()).await
}

pub async fn list_student_attendance(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .list_for_student(&req, student_id.0)
        .await
}

pub async fn update_attendance(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<MarkAttendanceRequest>,
) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE
        .update(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_attendance(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ATTENDANCE_SERVICE.delete(&req, id.0).await
}

// 配置路由
pub fn configure_attendance_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/attendance")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/mark").route(
                    web::post()
                        .to(mark_attendance)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/mark-bulk").route(
                    web::post()
                        .to(mark_attendance_bulk)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/status").route(
                    web::get()
                        .to(submission_status)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/all").route(
                    web::get()
                        .to(list_attendance)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                // 学生只能查看自己的考勤，由服务层校验
                web::resource("/student/{student_id}")
                    .route(web::get().to(list_student_attendance)),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_attendance)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
