use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Datelike;
use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::SchoolSyncError;
use crate::models::admissions::{
    entities::{AdmissionStatus, first_free_roll_number},
    requests::{AdmissionListQuery, UpdateAdmissionStatusRequest},
};
use crate::models::students::requests::StudentListQuery;
use crate::models::{ApiResponse, ErrorCode, ListResponse};
use crate::services::{conflict, not_found, storage_error};
use crate::storage::Storage;
use crate::utils::today;

use super::AdmissionService;

fn roll_numbers_exhausted() -> HttpResponse {
    conflict(ErrorCode::RollNumberExhausted, "Maximum roll numbers reached")
}

/// 当年第一个未被学生或其他申请占用的学号
async fn next_roll_number(storage: &Arc<dyn Storage>) -> crate::errors::Result<Option<String>> {
    let mut taken: HashSet<String> = storage
        .list_students(StudentListQuery::default())
        .await?
        .into_iter()
        .map(|s| s.roll_no)
        .collect();
    taken.extend(
        storage
            .list_admissions(AdmissionListQuery::default())
            .await?
            .into_iter()
            .filter_map(|a| a.roll_number),
    );

    Ok(first_free_roll_number(today().year(), |candidate| {
        taken.contains(candidate)
    }))
}

pub async fn handle_list(
    service: &AdmissionService,
    request: &HttpRequest,
    query: AdmissionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_admissions(query).await {
        Ok(admissions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ListResponse::new(admissions),
            "Applications retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list applications",
            e,
        )),
    }
}

pub async fn handle_get(
    service: &AdmissionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.get_admission_by_id(id).await {
        Ok(Some(admission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            admission,
            "Application retrieved successfully",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AdmissionNotFound,
            "Application not found",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::AdmissionNotFound,
            "Failed to load application",
            e,
        )),
    }
}

pub async fn handle_update_status(
    service: &AdmissionService,
    request: &HttpRequest,
    id: i64,
    body: UpdateAdmissionStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let existing = match storage.get_admission_by_id(id).await {
        Ok(Some(admission)) => admission,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::AdmissionNotFound,
                "Application not found",
            ));
        }
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::AdmissionNotFound,
                "Failed to load application",
                e,
            ));
        }
    };

    // 学号只在首次批准时分配
    let roll_number = if body.status == AdmissionStatus::Approved && existing.roll_number.is_none()
    {
        match next_roll_number(&storage).await {
            Ok(Some(roll)) => Some(roll),
            Ok(None) => return Ok(roll_numbers_exhausted()),
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::InternalServerError,
                    "Failed to allocate roll number",
                    e,
                ));
            }
        }
    } else {
        None
    };

    match storage
        .update_admission_status(id, body.status, body.remarks, roll_number)
        .await
    {
        Ok(Some(admission)) => {
            tracing::info!(
                "Application {} is now {} (roll number: {})",
                admission.application_number,
                admission.status,
                admission.roll_number.as_deref().unwrap_or("-")
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                admission,
                "Application status updated",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::AdmissionNotFound,
            "Application not found",
        )),
        // 并发批准抢到同一学号
        Err(SchoolSyncError::Conflict(_)) => Ok(conflict(
            ErrorCode::RollNumberAlreadyExists,
            "Roll number was just assigned to another application, please retry",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to update application",
            e,
        )),
    }
}

pub async fn handle_delete(
    service: &AdmissionService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_admission(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Application deleted successfully",
        ))),
        Ok(false) => Ok(not_found(
            ErrorCode::AdmissionNotFound,
            "Application not found",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::AdmissionNotFound,
            "Failed to delete application",
            e,
        )),
    }
}
