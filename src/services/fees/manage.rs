use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::fees::requests::{CreateFeeRequest, FeeListQuery, UpdateFeeRequest};
use crate::models::{ApiResponse, ErrorCode, ListResponse};
use crate::services::access::{current_user, ensure_admin_or_owning_student};
use crate::services::{bad_request, not_found, storage_error, try_or_respond};
use crate::utils::non_empty;

use super::{FeeService, sweep_overdue};

fn validate_amount(amount: f64) -> Result<(), HttpResponse> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(bad_request(
            ErrorCode::BadRequest,
            "Amount must be greater than 0",
        ))
    }
}

pub async fn handle_create(
    service: &FeeService,
    request: &HttpRequest,
    body: CreateFeeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    try_or_respond!(validate_amount(body.amount));

    match storage.get_student_by_id(body.student_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::StudentNotFound,
                "Failed to load student",
                e,
            ));
        }
    }

    let body = CreateFeeRequest {
        remarks: non_empty(body.remarks),
        ..body
    };

    match storage.create_fee(body).await {
        Ok(fee) => {
            tracing::info!(
                "Created {} fee of {:.2} for student {}",
                fee.fee_type,
                fee.amount,
                fee.student_id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(fee, "Fee created successfully")))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to create fee",
            e,
        )),
    }
}

pub async fn handle_list(
    service: &FeeService,
    request: &HttpRequest,
    query: FeeListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    sweep_overdue(&storage).await;

    match storage.list_fees(query).await {
        Ok(fees) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ListResponse::new(fees),
            "Fees retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list fees",
            e,
        )),
    }
}

pub async fn handle_list_for_student(
    service: &FeeService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_or_respond!(current_user(request));
    try_or_respond!(ensure_admin_or_owning_student(&storage, &user, student_id).await);
    sweep_overdue(&storage).await;

    let query = FeeListQuery {
        student_id: Some(student_id),
        status: None,
    };
    match storage.list_fees(query).await {
        Ok(fees) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ListResponse::new(fees),
            "Fees retrieved successfully",
        ))),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to list fees",
            e,
        )),
    }
}

pub async fn handle_update(
    service: &FeeService,
    request: &HttpRequest,
    id: i64,
    body: UpdateFeeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    if let Some(amount) = body.amount {
        try_or_respond!(validate_amount(amount));
    }

    match storage.update_fee(id, body).await {
        Ok(Some(fee)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            fee,
            "Fee updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::FeeNotFound, "Fee record not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::FeeNotFound,
            "Failed to update fee",
            e,
        )),
    }
}

pub async fn handle_delete(
    service: &FeeService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.delete_fee(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Fee deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::FeeNotFound, "Fee record not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::FeeNotFound,
            "Failed to delete fee",
            e,
        )),
    }
}
