use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::UpdateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{
    bad_request, conflict, evict_cached_user, not_found, storage_error, try_or_respond,
};
use crate::utils::non_empty;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_phone};

use super::StudentService;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
    body: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let mut update = UpdateStudentRequest {
        email: non_empty(body.email),
        phone: non_empty(body.phone),
        roll_no: non_empty(body.roll_no),
        class_name: non_empty(body.class_name),
        password: None,
    };

    if let Some(email) = &update.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }

    if let Some(phone) = &update.phone {
        if let Err(msg) = validate_phone(phone) {
            return Ok(bad_request(ErrorCode::UserPhoneInvalid, msg));
        }
        match storage.student_phone_exists(phone, Some(id)).await {
            Ok(true) => {
                return Ok(conflict(
                    ErrorCode::StudentPhoneAlreadyExists,
                    "Phone number already registered to another student",
                ));
            }
            Ok(false) => {}
            Err(e) => return Ok(storage_error(ErrorCode::StudentNotFound, "Update failed", e)),
        }
    }

    if let Some(roll_no) = &update.roll_no {
        match storage.student_roll_exists(roll_no, Some(id)).await {
            Ok(true) => {
                return Ok(conflict(
                    ErrorCode::RollNumberAlreadyExists,
                    "Roll number already exists",
                ));
            }
            Ok(false) => {}
            Err(e) => return Ok(storage_error(ErrorCode::StudentNotFound, "Update failed", e)),
        }
    }

    // 提供了新密码时重新哈希
    if let Some(password) = non_empty(body.password) {
        try_or_respond!(
            validate_password_simple(&password)
                .map_err(|msg| bad_request(ErrorCode::UserPasswordInvalid, msg))
        );
        update.password = match hash_password(&password) {
            Ok(hash) => Some(hash),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("Password hashing failed: {e}"),
                    )),
                );
            }
        };
    }

    match storage.update_student(id, update).await {
        Ok(Some(student)) => {
            evict_cached_user(request, student.user_id).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
        Err(e) => Ok(storage_error(
            ErrorCode::UserEmailAlreadyExists,
            "Failed to update student",
            e,
        )),
    }
}
