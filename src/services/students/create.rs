use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::CreateStudentRequest;
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::auth::register::{
    check_email_exists, check_student_uniqueness, check_username_exists, validate_fields,
};
use crate::services::{bad_request, storage_error, try_or_respond};
use crate::utils::non_empty;
use crate::utils::password::hash_password;

use super::StudentService;

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    body: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let username = body.username.trim().to_string();
    let email = body.email.trim().to_string();
    let phone = non_empty(body.phone);
    let (Some(roll_no), Some(class_name)) = (
        non_empty(Some(body.roll_no)),
        non_empty(Some(body.class_name)),
    ) else {
        return Ok(bad_request(
            ErrorCode::BadRequest,
            "Roll number and class name are required",
        ));
    };

    try_or_respond!(validate_fields(
        &username,
        &email,
        &body.password,
        phone.as_deref()
    ));
    try_or_respond!(check_username_exists(&storage, &username).await);
    try_or_respond!(check_email_exists(&storage, &email).await);
    try_or_respond!(check_student_uniqueness(&storage, &roll_no, phone.as_deref()).await);

    let password = match hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let user = CreateUserRequest {
        username,
        email,
        phone,
        password,
        role: UserRole::Student,
    };

    match storage.create_student(user, roll_no, class_name).await {
        Ok(student) => {
            tracing::info!(
                "Created student {} (roll {}) in class {}",
                student.username,
                student.roll_no,
                student.class_name
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e) => Ok(storage_error(
            ErrorCode::RollNumberAlreadyExists,
            "Failed to create student",
            e,
        )),
    }
}
