use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::results::{
    requests::{ResultListQuery, StatisticsQuery},
    responses::ClassStatistics,
};
use crate::models::{ApiResponse, ErrorCode, ListResponse};
use crate::services::access::{current_user, ensure_student_access};
use crate::services::{storage_error, try_or_respond};
use crate::utils::non_empty;

use super::ResultService;

pub async fn handle_list(
    service: &ResultService,
    request: &HttpRequest,
    query: ResultListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let query = ResultListQuery {
        class_name: non_empty(query.class_name),
        academic_year: non_empty(query.academic_year),
        ..query
    };

    match storage.list_results(query).await {
        Ok(results) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ListResponse::new(results),
            "Results retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list results",
            e,
        )),
    }
}

pub async fn handle_list_for_student(
    service: &ResultService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_or_respond!(current_user(request));
    try_or_respond!(ensure_student_access(&storage, &user, student_id).await);

    handle_list(
        service,
        request,
        ResultListQuery {
            student_id: Some(student_id),
            ..Default::default()
        },
    )
    .await
}

pub async fn handle_statistics(
    service: &ResultService,
    request: &HttpRequest,
    class_name: String,
    query: StatisticsQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let results = match storage
        .list_results(ResultListQuery {
            class_name: Some(class_name.clone()),
            subject: non_empty(query.subject),
            exam_type: non_empty(query.exam_type),
            academic_year: non_empty(query.academic_year),
            ..Default::default()
        })
        .await
    {
        Ok(results) => results,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to load results",
                e,
            ));
        }
    };

    let message = if results.is_empty() {
        "No results found"
    } else {
        "Statistics calculated successfully"
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClassStatistics::compute(&class_name, &results),
        message,
    )))
}
