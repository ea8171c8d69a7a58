use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest,
};
use crate::models::fees::requests::{
    CreateFeeRequest, FeeListQuery, PayFeeRequest, UpdateFeeRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::{EnrollmentService, FeeService, ProfileService};
use crate::utils::{SafeIDI64, SafeStudentIdI64};

static FEE_SERVICE: Lazy<FeeService> = Lazy::new(FeeService::new_lazy);
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);
static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

// 费用
pub async fn create_fee(
    req: HttpRequest,
    body: web::Json<CreateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.create(&req, body.into_inner()).await
}

pub async fn list_fees(
    req: HttpRequest,
    query: web::Query<FeeListQuery>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list(&req, query.into_inner()).await
}

pub async fn list_student_fees(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.list_for_student(&req, student_id.0).await
}

pub async fn update_fee(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateFeeRequest>,
) -> ActixResult<HttpResponse> {
    FEE_SERVICE.update(&req, id.0, body.into_inner()).await
}

pub async fn delete_fee(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.delete(&req, id.0).await
}

pub async fn fee_checkout(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.checkout(&req, id.0).await
}

// 请求体可省略
pub async fn pay_fee(
    req: HttpRequest,
    id: SafeIDI64,
    body: Option<web::Json<PayFeeRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    FEE_SERVICE.pay(&req, id.0, body).await
}

pub async fn fee_receipt(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    FEE_SERVICE.receipt(&req, id.0).await
}

// 学籍
pub async fn create_enrollment(
    req: HttpRequest,
    body: web::Json<CreateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.create(&req, body.into_inner()).await
}

pub async fn list_enrollments(
    req: HttpRequest,
    query: web::Query<EnrollmentListQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.list(&req, query.into_inner()).await
}

pub async fn get_enrollment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.get(&req, id.0).await
}

pub async fn update_enrollment(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateEnrollmentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .update(&req, id.0, body.into_inner())
        .await
}

pub async fn delete_enrollment(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE.delete(&req, id.0).await
}

// 档案
pub async fn student_profile(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    PROFILE_SERVICE.student_profile(&req, id.0).await
}

// 配置路由
pub fn configure_student_management_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/studentmanagement")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/fee").route(
                    web::post()
                        .to(create_fee)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            .service(
                web::resource("/fee/all").route(
                    web::get()
                        .to(list_fees)
                        .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                ),
            )
            // 以下三个接口允许管理员或所属学生，由服务层校验
            .route("/fee/student/{student_id}", web::get().to(list_student_fees))
            .route("/fee/checkout/{id}", web::get().to(fee_checkout))
            .route("/fee/pay/{id}", web::put().to(pay_fee))
            .route("/fee/receipt/{id}", web::get().to(fee_receipt))
            .service(
                web::resource("/fee/{id}")
                    .route(
                        web::put()
                            .to(update_fee)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_fee)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::scope("/enrollment")
                    .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles()))
                    .service(
                        web::resource("")
                            .route(web::post().to(create_enrollment))
                            .route(web::get().to(list_enrollments)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(get_enrollment))
                            .route(web::put().to(update_enrollment))
                            .route(web::delete().to(delete_enrollment)),
                    ),
            )
            .route("/profile/{id}", web::get().to(student_profile)),
    );
}
