use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::results::requests::{
    BulkUploadResultRequest, ResultListQuery, StatisticsQuery, UpdateResultRequest,
    UploadResultRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::ResultService;
use crate::utils::{SafeClassName, SafeIDI64, SafeStudentIdI64};

static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

pub async fn upload_result(
    req: HttpRequest,
    body: web::Json<UploadResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.upload(&req, body.into_inner()).await
}

pub async fn upload_results_bulk(
    req: HttpRequest,
    body: web::Json<BulkUploadResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.upload_bulk(&req, body.into_inner()).await
}

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ResultListQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list(&req, query.into_inner()).await
}

pub async fn list_student_results(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_for_student(&req, student_id.0).await
}

pub async fn list_class_results(
    req: HttpRequest,
    class_name: SafeClassName,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.list_for_class(&req, class_name.0).await
}

pub async fn class_statistics(
    req: HttpRequest,
    class_name: SafeClassName,
    query: web::Query<StatisticsQuery>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .statistics(&req, class_name.0, query.into_inner())
        .await
}

pub async fn update_result(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.update(&req, id.0, body.into_inner()).await
}

pub async fn delete_result(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    RESULT_SERVICE.delete(&req, id.0).await
}

// 配置路由
pub fn configure_result_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/result")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload").route(
                    web::post()
                        .to(upload_result)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/upload-bulk").route(
                    web::post()
                        .to(upload_results_bulk)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/all").route(
                    web::get()
                        .to(list_results)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/student/{student_id}").route(web::get().to(list_student_results)),
            )
            .service(
                web::resource("/class/{class_name}").route(
                    web::get()
                        .to(list_class_results)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/statistics/{class_name}").route(
                    web::get()
                        .to(class_statistics)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(
                        web::put()
                            .to(update_result)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_result)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
