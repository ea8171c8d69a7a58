use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::admissions::{
    entities::generate_application_number,
    requests::{ApplyAdmissionRequest, CheckAdmissionStatusQuery},
    responses::{AdmissionStatusResponse, ApplyAdmissionResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{bad_request, not_found, storage_error};
use crate::utils::{non_empty, now_millis, today};

use super::AdmissionService;

pub async fn handle_apply(
    service: &AdmissionService,
    request: &HttpRequest,
    body: ApplyAdmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 返回全部校验错误，便于表单一次性提示
    if let Err(errors) = body.validate(today()) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::AdmissionInvalid,
            errors,
            "Application validation failed",
        )));
    }

    let application_number = generate_application_number(now_millis());
    match storage.create_admission(body, application_number).await {
        Ok(admission) => {
            tracing::info!(
                "Admission application {} received from {} for class {}",
                admission.application_number,
                admission.email,
                admission.applied_class
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                ApplyAdmissionResponse {
                    id: admission.id,
                    application_number: admission.application_number,
                    status: admission.status,
                },
                "Application submitted successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::AdmissionInvalid,
            "Failed to submit application",
            e,
        )),
    }
}

/// 公开状态查询：邮箱或手机号至少一项
pub async fn handle_check_status(
    service: &AdmissionService,
    request: &HttpRequest,
    query: CheckAdmissionStatusQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let email = non_empty(query.email);
    let phone = non_empty(query.phone);

    if email.is_none() && phone.is_none() {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Email or phone number is required",
        ));
    }

    match storage
        .find_admission_by_contact(email.as_deref(), phone.as_deref())
        .await
    {
        Ok(Some(admission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AdmissionStatusResponse::from(admission),
            "Application found",
        ))),
        Ok(None) => Ok(not_found(
            ErrorCode::AdmissionNotFound,
            "No application found for the given details",
        )),
        Err(e) => Ok(storage_error(
            ErrorCode::AdmissionNotFound,
            "Failed to look up application",
            e,
        )),
    }
}
