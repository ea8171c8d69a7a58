use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolSyncError;
use crate::models::attendance::{
    entities::AttendanceStatus,
    requests::{BulkAttendanceRequest, MarkAttendanceRequest},
    responses::BulkAttendanceResponse,
};
use crate::models::notifications::entities::NotificationType;
use crate::models::students::entities::Student;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, conflict, not_found, storage_error, try_or_respond};
use crate::storage::Storage;

use super::{ALREADY_MARKED, AttendanceService, notify_absence};

async fn load_student(
    storage: &Arc<dyn Storage>,
    student_id: i64,
) -> Result<Student, HttpResponse> {
    match storage.get_student_by_id(student_id).await {
        Ok(Some(student)) => Ok(student),
        Ok(None) => Err(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Err(storage_error(
            ErrorCode::StudentNotFound,
            "Failed to load student",
            e,
        )),
    }
}

fn already_marked() -> HttpResponse {
    conflict(ErrorCode::AttendanceAlreadyMarked, ALREADY_MARKED)
}

pub async fn handle_mark(
    service: &AttendanceService,
    request: &HttpRequest,
    body: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    try_or_respond!(load_student(&storage, body.student_id).await);

    match storage.attendance_exists(body.student_id, body.date).await {
        Ok(true) => return Ok(already_marked()),
        Ok(false) => {}
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::AttendanceNotFound,
                "Failed to check attendance",
                e,
            ));
        }
    }

    // 并发下的重复写入由唯一索引兜底
    let record = match storage
        .create_attendance(body.student_id, body.date, body.status)
        .await
    {
        Ok(record) => record,
        Err(SchoolSyncError::Conflict(_)) => return Ok(already_marked()),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to mark attendance",
                e,
            ));
        }
    };

    if record.status == AttendanceStatus::Absent {
        notify_absence(&storage, &record, NotificationType::Absence).await;
    }

    Ok(HttpResponse::Created().json(ApiResponse::success(
        record,
        "Attendance marked successfully",
    )))
}

pub async fn handle_mark_bulk(
    service: &AttendanceService,
    request: &HttpRequest,
    body: BulkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if body.records.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Attendance sheet must contain at least one record",
        ));
    }

    // 表中每名学生当天都已有记录，视为整表已提交
    let mut already_marked_count = 0;
    for entry in &body.records {
        match storage.attendance_exists(entry.student_id, body.date).await {
            Ok(true) => already_marked_count += 1,
            Ok(false) => {}
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::AttendanceNotFound,
                    "Failed to check attendance",
                    e,
                ));
            }
        }
    }
    if already_marked_count == body.records.len() {
        return Ok(conflict(
            ErrorCode::AttendanceAlreadyMarked,
            format!("Attendance already submitted for {}", body.date),
        ));
    }

    let mut response = BulkAttendanceResponse {
        date: body.date,
        total_records: body.records.len(),
        success_count: 0,
        fail_count: 0,
        absent_students: Vec::new(),
        failures: Vec::new(),
    };

    for entry in body.records {
        match mark_one(&storage, entry.student_id, body.date, entry.status).await {
            Ok(record) => {
                response.success_count += 1;
                if record.status == AttendanceStatus::Absent {
                    response.absent_students.push(record.student_name.clone());
                    notify_absence(&storage, &record, NotificationType::Absence).await;
                }
            }
            Err(reason) => {
                response.fail_count += 1;
                response
                    .failures
                    .push(format!("Student {}: {}", entry.student_id, reason));
            }
        }
    }

    tracing::info!(
        "Attendance sheet for {}: {} saved, {} failed",
        response.date,
        response.success_count,
        response.fail_count
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Attendance sheet processed",
    )))
}

/// 整表提交中的单行，失败原因以字符串返回
async fn mark_one(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    date: chrono::NaiveDate,
    status: AttendanceStatus,
) -> Result<crate::models::attendance::entities::AttendanceRecord, String> {
    match storage.get_student_by_id(student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err("student not found".to_string()),
        Err(e) => return Err(e.message().to_string()),
    }
    match storage.attendance_exists(student_id, date).await {
        Ok(true) => return Err("attendance already marked".to_string()),
        Ok(false) => {}
        Err(e) => return Err(e.message().to_string()),
    }
    storage
        .create_attendance(student_id, date, status)
        .await
        .map_err(|e| match e {
            SchoolSyncError::Conflict(_) => "attendance already marked".to_string(),
            other => other.message().to_string(),
        })
}

pub async fn handle_update(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
    body: MarkAttendanceRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_attendance_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AttendanceNotFound,
                "Attendance record not found",
            ));
        }
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::AttendanceNotFound,
                "Failed to load attendance",
                e,
            ));
        }
    };

    try_or_respond!(load_student(&storage, body.student_id).await);

    // 移动到另一条已占用的 (学生, 日期) 上视为冲突
    let moved = existing.student_id != body.student_id || existing.date != body.date;
    if moved {
        match storage.attendance_exists(body.student_id, body.date).await {
            Ok(true) => return Ok(already_marked()),
            Ok(false) => {}
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::AttendanceNotFound,
                    "Failed to check attendance",
                    e,
                ));
            }
        }
    }

    let record = match storage
        .update_attendance(id, body.student_id, body.date, body.status)
        .await
    {
        Ok(Some(record)) => record,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AttendanceNotFound,
                "Attendance record not found",
            ));
        }
        Err(SchoolSyncError::Conflict(_)) => return Ok(already_marked()),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::AttendanceNotFound,
                "Failed to update attendance",
                e,
            ));
        }
    };

    if record.status == AttendanceStatus::Absent {
        notify_absence(&storage, &record, NotificationType::AbsenceUpdate).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        record,
        "Attendance updated successfully",
    )))
}

pub async fn handle_delete(
    service: &AttendanceService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_attendance(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Attendance deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::AttendanceNotFound,
            "Attendance record not found",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::AttendanceNotFound,
            "Failed to delete attendance",
            e,
        )),
    }
}
