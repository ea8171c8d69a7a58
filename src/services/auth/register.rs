use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginResponse, RegisterRequest},
    users::{
        entities::{User, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::services::{bad_request, conflict, forbidden, storage_error, try_or_respond};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use crate::utils::non_empty;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    validate_email, validate_password_simple, validate_phone, validate_username,
};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    // 管理员账号不能自助注册
    if register_request.role == UserRole::Admin {
        return Ok(forbidden("Admin accounts cannot be self-registered"));
    }

    let username = register_request.username.trim().to_string();
    let email = register_request.email.trim().to_string();
    let phone = non_empty(register_request.phone.clone());

    // 1. 字段校验
    try_or_respond!(validate_fields(
        &username,
        &email,
        &register_request.password,
        phone.as_deref()
    ));

    let student_fields = if register_request.role == UserRole::Student {
        let roll_no = non_empty(register_request.roll_no.clone());
        let class_name = non_empty(register_request.class_name.clone());
        match (roll_no, class_name) {
            (Some(roll_no), Some(class_name)) => Some((roll_no, class_name)),
            _ => {
                return Ok(bad_request(
                    ErrorCode::BadRequest,
                    "Roll number and class name are required for students",
                ));
            }
        }
    } else {
        None
    };

    // 2. 唯一性检查
    try_or_respond!(check_username_exists(&storage, &username).await);
    try_or_respond!(check_email_exists(&storage, &email).await);
    if let Some((roll_no, _)) = &student_fields {
        try_or_respond!(check_student_uniqueness(&storage, roll_no, phone.as_deref()).await);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let create_user = CreateUserRequest {
        username,
        email,
        phone,
        password: password_hash,
        role: register_request.role,
    };

    // 4. 创建账号与档案
    let (user_id, student_id, teacher_id) = match student_fields {
        Some((roll_no, class_name)) => {
            let student = try_or_respond!(
                storage
                    .create_student(create_user, roll_no, class_name)
                    .await
                    .map_err(|e| storage_error(ErrorCode::RegisterFailed, "Register failed", e))
            );
            (student.user_id, Some(student.id), None)
        }
        None => {
            let teacher = try_or_respond!(
                storage
                    .create_teacher(
                        create_user,
                        non_empty(register_request.subject),
                        non_empty(register_request.qualification),
                    )
                    .await
                    .map_err(|e| storage_error(ErrorCode::RegisterFailed, "Register failed", e))
            );
            (teacher.user_id, None, Some(teacher.id))
        }
    };

    let user = match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed: user was not persisted",
                )),
            );
        }
        Err(e) => return Ok(storage_error(ErrorCode::RegisterFailed, "Register failed", e)),
    };

    tracing::info!("Registered {} account {}", user.role, user.username);

    // 5. 注册即登录
    respond_with_tokens(user, student_id, teacher_id, config.jwt.access_token_expiry)
}

fn respond_with_tokens(
    user: User,
    student_id: Option<i64>,
    teacher_id: Option<i64>,
    access_token_expiry: i64,
) -> ActixResult<HttpResponse> {
    let token_pair = match user.generate_token_pair() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Registered, but unable to generate token",
                )),
            );
        }
    };

    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: access_token_expiry * 60,
        user,
        student_id,
        teacher_id,
    };

    Ok(HttpResponse::Created()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Registration successful")))
}

pub(crate) fn validate_fields(
    username: &str,
    email: &str,
    password: &str,
    phone: Option<&str>,
) -> Result<(), HttpResponse> {
    validate_username(username).map_err(|msg| bad_request(ErrorCode::UserNameInvalid, msg))?;
    validate_email(email).map_err(|msg| bad_request(ErrorCode::UserEmailInvalid, msg))?;
    validate_password_simple(password)
        .map_err(|msg| bad_request(ErrorCode::UserPasswordInvalid, msg))?;
    if let Some(phone) = phone {
        validate_phone(phone).map_err(|msg| bad_request(ErrorCode::UserPhoneInvalid, msg))?;
    }
    Ok(())
}

pub(crate) async fn check_username_exists(
    storage: &Arc<dyn Storage>,
    username: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_username(username).await {
        Ok(Some(_)) => Err(conflict(
            ErrorCode::UserNameAlreadyExists,
            "Username already exists",
        )),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_error(ErrorCode::RegisterFailed, "Register failed", e)),
    }
}

pub(crate) async fn check_email_exists(
    storage: &Arc<dyn Storage>,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(conflict(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        )),
        Ok(None) => Ok(()),
        Err(e) => Err(storage_error(ErrorCode::RegisterFailed, "Register failed", e)),
    }
}

/// 学号与学生手机号唯一
pub(crate) async fn check_student_uniqueness(
    storage: &Arc<dyn Storage>,
    roll_no: &str,
    phone: Option<&str>,
) -> Result<(), HttpResponse> {
    match storage.student_roll_exists(roll_no, None).await {
        Ok(true) => {
            return Err(conflict(
                ErrorCode::RollNumberAlreadyExists,
                "Roll number already exists",
            ));
        }
        Ok(false) => {}
        Err(e) => return Err(storage_error(ErrorCode::RegisterFailed, "Register failed", e)),
    }
    if let Some(phone) = phone {
        match storage.student_phone_exists(phone, None).await {
            Ok(true) => {
                return Err(conflict(
                    ErrorCode::StudentPhoneAlreadyExists,
                    "Phone number already registered to another student",
                ));
            }
            Ok(false) => {}
            Err(e) => return Err(storage_error(ErrorCode::RegisterFailed, "Register failed", e)),
        }
    }
    Ok(())
}
