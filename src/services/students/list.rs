use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::StudentListQuery;
use crate::models::{ApiResponse, ErrorCode, ListResponse};
use crate::services::storage_error;
use crate::utils::non_empty;

use super::StudentService;

pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
    query: StudentListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let query = StudentListQuery {
        class_name: non_empty(query.class_name),
        search: non_empty(query.search),
    };

    match storage.list_students(query).await {
        Ok(students) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ListResponse::new(students),
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list students",
            e,
        )),
    }
}

pub async fn list_classes(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_class_names().await {
        Ok(classes) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            classes,
            "Classes retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list classes",
            e,
        )),
    }
}
