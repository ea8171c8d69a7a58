use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendance::{
    requests::{AttendanceListQuery, AttendanceStatusQuery},
    responses::AttendanceSubmissionStatus,
};
use crate::models::students::requests::StudentListQuery;
use crate::models::{ApiResponse, ErrorCode, ListResponse};
use crate::services::access::{current_user, ensure_student_access};
use crate::services::{storage_error, try_or_respond};
use crate::utils::non_empty;

use super::AttendanceService;

/// 某日（某班）考勤是否已提交
pub async fn handle_status(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceStatusQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let class_name = non_empty(query.class_name);

    let students = match storage
        .list_students(StudentListQuery {
            class_name: class_name.clone(),
            search: None,
        })
        .await
    {
        Ok(students) => students,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to count students",
                e,
            ));
        }
    };

    let records = match storage
        .list_attendance(AttendanceListQuery {
            student_id: None,
            date: Some(query.date),
            class_name: class_name.clone(),
        })
        .await
    {
        Ok(records) => records,
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to load attendance",
                e,
            ));
        }
    };

    let status =
        AttendanceSubmissionStatus::new(query.date, class_name, students.len(), records.len());

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        status,
        "Attendance status retrieved",
    )))
}

pub async fn handle_list(
    service: &AttendanceService,
    request: &HttpRequest,
    query: AttendanceListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let query = AttendanceListQuery {
        class_name: non_empty(query.class_name),
        ..query
    };

    match storage.list_attendance(query).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ListResponse::new(records),
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list attendance",
            e,
        )),
    }
}

pub async fn handle_list_for_student(
    service: &AttendanceService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_or_respond!(current_user(request));
    try_or_respond!(ensure_student_access(&storage, &user, student_id).await);

    let query = AttendanceListQuery {
        student_id: Some(student_id),
        ..Default::default()
    };
    match storage.list_attendance(query).await {
        Ok(records) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ListResponse::new(records),
            "Attendance retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list attendance",
            e,
        )),
    }
}
