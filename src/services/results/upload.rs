use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::SchoolSyncError;
use crate::models::results::{
    entities::{
        DEFAULT_EXAM_TYPE, DEFAULT_MAX_MARKS, ResultRecord, academic_year_for, validate_marks,
    },
    requests::{BulkUploadResultRequest, UpdateResultRequest, UploadResultRequest},
    responses::BulkUploadResultResponse,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::current_user;
use crate::services::{bad_request, conflict, not_found, storage_error, try_or_respond};
use crate::storage::Storage;
use crate::utils::{non_empty, today};

use super::{ALREADY_EXISTS, ResultService};

/// 单条成绩上传失败的原因
enum UploadError {
    Invalid(String),
    StudentMissing,
    Duplicate,
    Storage(SchoolSyncError),
}

impl UploadError {
    fn into_response(self) -> HttpResponse {
        match self {
            UploadError::Invalid(msg) => bad_request(ErrorCode::ResultMarksInvalid, msg),
            UploadError::StudentMissing => {
                not_found(ErrorCode::StudentNotFound, "Student not found")
            }
            UploadError::Duplicate => conflict(ErrorCode::ResultAlreadyExists, ALREADY_EXISTS),
            UploadError::Storage(e) => {
                storage_error(ErrorCode::ResultAlreadyExists, "Failed to upload result", e)
            }
        }
    }

    fn reason(&self) -> String {
        match self {
            UploadError::Invalid(msg) => msg.clone(),
            UploadError::StudentMissing => "student not found".to_string(),
            UploadError::Duplicate => "result already exists".to_string(),
            UploadError::Storage(e) => e.message().to_string(),
        }
    }
}

/// 填充默认值后写入：满分 100、Mid-term、当前学年
async fn upload_one(
    storage: &Arc<dyn Storage>,
    mut body: UploadResultRequest,
    uploaded_by: &str,
) -> Result<ResultRecord, UploadError> {
    let subject = body.subject.trim().to_string();
    if subject.is_empty() {
        return Err(UploadError::Invalid("Subject is required".to_string()));
    }
    let max_marks = body.max_marks.unwrap_or(DEFAULT_MAX_MARKS);
    validate_marks(body.marks, max_marks).map_err(UploadError::Invalid)?;

    let exam_type =
        non_empty(body.exam_type.take()).unwrap_or_else(|| DEFAULT_EXAM_TYPE.to_string());
    let academic_year =
        non_empty(body.academic_year.take()).unwrap_or_else(|| academic_year_for(today()));

    match storage.get_student_by_id(body.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Err(UploadError::StudentMissing),
        Err(e) => return Err(UploadError::Storage(e)),
    }

    match storage
        .result_exists(body.student_id, &subject, &exam_type, &academic_year, None)
        .await
    {
        Ok(true) => return Err(UploadError::Duplicate),
        Ok(false) => {}
        Err(e) => return Err(UploadError::Storage(e)),
    }

    let body = UploadResultRequest {
        subject,
        max_marks: Some(max_marks),
        exam_type: Some(exam_type),
        academic_year: Some(academic_year),
        ..body
    };

    storage
        .create_result(body, uploaded_by)
        .await
        .map_err(|e| match e {
            SchoolSyncError::Conflict(_) => UploadError::Duplicate,
            other => UploadError::Storage(other),
        })
}

pub async fn handle_upload(
    service: &ResultService,
    request: &HttpRequest,
    body: UploadResultRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_or_respond!(current_user(request));

    match upload_one(&storage, body, &user.username).await {
        Ok(record) => {
            tracing::info!(
                "{} uploaded {} result for student {}: {} ({})",
                user.username,
                record.subject,
                record.student_id,
                record.marks,
                record.grade
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                record,
                "Result uploaded successfully",
            )))
        }
        Err(e) => Ok(e.into_response()),
    }
}

pub async fn handle_upload_bulk(
    service: &ResultService,
    request: &HttpRequest,
    body: BulkUploadResultRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_or_respond!(current_user(request));

    if body.results.is_empty() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "At least one result is required",
        ));
    }

    let mut response = BulkUploadResultResponse {
        total_records: body.results.len(),
        success_count: 0,
        fail_count: 0,
        errors: Vec::new(),
    };

    for (index, row) in body.results.into_iter().enumerate() {
        let student_id = row.student_id;
        match upload_one(&storage, row, &user.username).await {
            Ok(_) => response.success_count += 1,
            Err(e) => {
                response.fail_count += 1;
                response.errors.push(format!(
                    "Row {} (student {}): {}",
                    index + 1,
                    student_id,
                    e.reason()
                ));
            }
        }
    }

    tracing::info!(
        "{} bulk uploaded results: {} saved, {} failed",
        user.username,
        response.success_count,
        response.fail_count
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Bulk upload processed",
    )))
}

pub async fn handle_update(
    service: &ResultService,
    request: &HttpRequest,
    id: i64,
    body: UpdateResultRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_result_by_id(id).await {
        Ok(Some(record)) => record,
        Ok(None) => return Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::ResultNotFound,
                "Failed to load result",
                e,
            ));
        }
    };

    let update = UpdateResultRequest {
        subject: non_empty(body.subject),
        exam_type: non_empty(body.exam_type),
        academic_year: non_empty(body.academic_year),
        ..body
    };

    let marks = update.marks.unwrap_or(existing.marks);
    let max_marks = update.max_marks.unwrap_or(existing.max_marks);
    if let Err(msg) = validate_marks(marks, max_marks) {
        return Ok(bad_request(ErrorCode::ResultMarksInvalid, msg));
    }

    let subject = update.subject.as_deref().unwrap_or(&existing.subject);
    let exam_type = update.exam_type.as_deref().unwrap_or(&existing.exam_type);
    let academic_year = update
        .academic_year
        .as_deref()
        .unwrap_or(&existing.academic_year);
    match storage
        .result_exists(existing.student_id, subject, exam_type, academic_year, Some(id))
        .await
    {
        Ok(true) => return Ok(conflict(ErrorCode::ResultAlreadyExists, ALREADY_EXISTS)),
        Ok(false) => {}
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::ResultNotFound,
                "Failed to check result",
                e,
            ));
        }
    }

    match storage.update_result(id, update).await {
        Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            record,
            "Result updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
        Err(SchoolSyncError::Conflict(_)) => {
            Ok(conflict(ErrorCode::ResultAlreadyExists, ALREADY_EXISTS))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::ResultNotFound,
            "Failed to update result",
            e,
        )),
    }
}

pub async fn handle_delete(
    service: &ResultService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_result(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Result deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::ResultNotFound, "Result not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::ResultNotFound,
            "Failed to delete result",
            e,
        )),
    }
}
