use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::teachers::requests::{CreateTeacherRequest, UpdateTeacherRequest};
use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
use crate::models::{ApiResponse, ErrorCode, ListResponse};
use crate::services::access::current_user;
use crate::services::auth::register::{check_email_exists, check_username_exists, validate_fields};
use crate::services::{
    bad_request, evict_cached_user, forbidden, not_found, storage_error, try_or_respond,
};
use crate::utils::non_empty;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_phone};

super::lazy_storage_service!(TeacherService);

fn hashing_failed(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("Password hashing failed: {e}"),
    ))
}

impl TeacherService {
    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match storage.list_teachers().await {
            Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                ListResponse::new(teachers),
                "Teachers retrieved successfully",
            ))),
            Err(e) => Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to list teachers",
                e,
            )),
        }
    }

    /// 管理员或教师本人
    pub async fn get_teacher(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = try_or_respond!(current_user(request));

        let teacher = match storage.get_teacher_by_id(id).await {
            Ok(Some(teacher)) => teacher,
            Ok(None) => return Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::TeacherNotFound,
                    "Failed to load teacher",
                    e,
                ));
            }
        };

        if user.role != UserRole::Admin && teacher.user_id != user.id {
            return Ok(forbidden("You can only access your own teacher record"));
        }

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            teacher,
            "Teacher retrieved successfully",
        )))
    }

    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        body: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        let username = body.username.trim().to_string();
        let email = body.email.trim().to_string();
        let phone = non_empty(body.phone);

        try_or_respond!(validate_fields(
            &username,
            &email,
            &body.password,
            phone.as_deref()
        ));
        try_or_respond!(check_username_exists(&storage, &username).await);
        try_or_respond!(check_email_exists(&storage, &email).await);

        let password = match hash_password(&body.password) {
            Ok(hash) => hash,
            Err(e) => return Ok(hashing_failed(e)),
        };

        let user = CreateUserRequest {
            username,
            email,
            phone,
            password,
            role: UserRole::Teacher,
        };

        match storage
            .create_teacher(user, non_empty(body.subject), non_empty(body.qualification))
            .await
        {
            Ok(teacher) => {
                tracing::info!("Created teacher {}", teacher.username);
                Ok(HttpResponse::Created().json(ApiResponse::success(
                    teacher,
                    "Teacher created successfully",
                )))
            }
            Err(e) => Ok(storage_error(
                ErrorCode::UserNameAlreadyExists,
                "Failed to create teacher",
                e,
            )),
        }
    }

    pub async fn update_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        let mut update = UpdateTeacherRequest {
            email: non_empty(body.email),
            phone: non_empty(body.phone),
            subject: non_empty(body.subject),
            qualification: non_empty(body.qualification),
            password: None,
        };

        if let Some(email) = &update.email
            && let Err(msg) = validate_email(email)
        {
            return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
        }
        if let Some(phone) = &update.phone
            && let Err(msg) = validate_phone(phone)
        {
            return Ok(bad_request(ErrorCode::UserPhoneInvalid, msg));
        }
        if let Some(password) = non_empty(body.password) {
            try_or_respond!(
                validate_password_simple(&password)
                    .map_err(|msg| bad_request(ErrorCode::UserPasswordInvalid, msg))
            );
            update.password = match hash_password(&password) {
                Ok(hash) => Some(hash),
                Err(e) => return Ok(hashing_failed(e)),
            };
        }

        match storage.update_teacher(id, update).await {
            Ok(Some(teacher)) => {
                evict_cached_user(request, teacher.user_id).await;
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    teacher,
                    "Teacher updated successfully",
                )))
            }
            Ok(None) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
            Err(e) => Ok(storage_error(
                ErrorCode::UserEmailAlreadyExists,
                "Failed to update teacher",
                e,
            )),
        }
    }

    pub async fn delete_teacher(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user_id = match storage.get_teacher_by_id(id).await {
            Ok(Some(teacher)) => teacher.user_id,
            Ok(None) => return Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::InternalServerError,
                    "Failed to load teacher",
                    e,
                ));
            }
        };
        match storage.delete_teacher(id).await {
            Ok(true) => {
                evict_cached_user(request, user_id).await;
                tracing::info!("Deleted teacher {}", id);
                Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                    "Teacher deleted successfully",
                )))
            }
            Ok(false) => Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
            Err(e) => Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to delete teacher",
                e,
            )),
        }
    }
}
