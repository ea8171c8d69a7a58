use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::fees::{
    entities::{generate_receipt_number, generate_transaction_id},
    requests::{FeePayment, PayFeeRequest},
    responses::{CheckoutPrefill, CheckoutResponse},
};
use crate::errors::SchoolSyncError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::current_user;
use crate::services::{bad_request, conflict, not_found, storage_error, try_or_respond};
use crate::utils::{non_empty, now_millis, today};

use super::{FeeService, load_accessible_fee};

const DEFAULT_PAYMENT_METHOD: &str = "Online";

fn already_paid() -> HttpResponse {
    conflict(ErrorCode::FeeAlreadyPaid, "Fee has already been paid")
}

/// 前端结账组件参数
pub async fn handle_checkout(
    service: &FeeService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let payment = &service.get_config().payment;
    let user = try_or_respond!(current_user(request));
    let fee = try_or_respond!(load_accessible_fee(&storage, &user, id).await);

    if fee.is_paid() {
        return Ok(already_paid());
    }
    if payment.key_id.trim().is_empty() {
        return Ok(HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
            ErrorCode::PaymentNotConfigured,
            "Online payment is not configured",
        )));
    }

    let student = match storage.get_student_by_id(fee.student_id).await {
        Ok(Some(student)) => student,
        Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => {
            return Ok(storage_error(
                ErrorCode::StudentNotFound,
                "Failed to load student",
                e,
            ));
        }
    };

    let response = CheckoutResponse {
        provider: payment.provider.clone(),
        key: payment.key_id.clone(),
        fee_id: fee.id,
        amount: fee.amount_in_minor_units(),
        currency: payment.currency.clone(),
        name: payment.merchant_name.clone(),
        description: format!("{} fee for {}", fee.fee_type, fee.student_name),
        prefill: CheckoutPrefill {
            name: student.username,
            email: student.email,
            contact: student.phone,
        },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Checkout ready")))
}

/// 记录一次支付
pub async fn handle_pay(
    service: &FeeService,
    request: &HttpRequest,
    id: i64,
    body: PayFeeRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_or_respond!(current_user(request));
    let fee = try_or_respond!(load_accessible_fee(&storage, &user, id).await);

    if fee.is_paid() {
        return Ok(already_paid());
    }

    let millis = now_millis();
    let payment = FeePayment {
        paid_date: today(),
        payment_method: non_empty(body.payment_method)
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        transaction_id: non_empty(body.transaction_id)
            .unwrap_or_else(|| generate_transaction_id(millis)),
        receipt_number: generate_receipt_number(fee.id, millis),
    };

    match storage.record_fee_payment(id, payment).await {
        Ok(Some(fee)) => {
            tracing::info!(
                "Fee {} paid by {} ({:.2}, txn {})",
                fee.id,
                user.username,
                fee.amount,
                fee.transaction_id.as_deref().unwrap_or("-")
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(fee, "Payment recorded successfully")))
        }
        Ok(None) => Ok(not_found(ErrorCode::FeeNotFound, "Fee record not found")),
        // 并发缴费时只有第一笔生效
        Err(SchoolSyncError::Conflict(_)) => Ok(already_paid()),
        Err(e) => Ok(storage_error(
            ErrorCode::InternalServerError,
            "Failed to record payment",
            e,
        )),
    }
}

/// 纯文本收据，以附件形式下载
pub async fn handle_receipt(
    service: &FeeService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_or_respond!(current_user(request));
    let fee = try_or_respond!(load_accessible_fee(&storage, &user, id).await);

    if !fee.is_paid() {
        return Ok(bad_request(
            ErrorCode::FeeNotPaid,
            "Receipt is only available for paid fees",
        ));
    }

    let body = fee.render_receipt(&service.get_config().app.school_name);
    let disposition = ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(format!(
            "fee-receipt-{}.txt",
            fee.id
        ))],
    };

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header(disposition)
        .body(body))
}
