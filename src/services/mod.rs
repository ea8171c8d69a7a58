//! 业务逻辑层
//!
//! 每个模块一个 Service，处理函数按操作拆分在子模块中。
//! 处理函数统一返回 `ActixResult<HttpResponse>`，业务错误以 `ApiResponse` 信封返回。

/// `Result<T, HttpResponse>` 出错时直接把响应返回给客户端
macro_rules! try_or_respond {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(response) => return Ok(response),
        }
    };
}
pub(crate) use try_or_respond;

/// 为 Service 生成 `new_lazy` 与 `get_storage`
macro_rules! lazy_storage_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn $crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub fn with_storage(storage: std::sync::Arc<dyn $crate::storage::Storage>) -> Self {
                Self {
                    storage: Some(storage),
                }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> actix_web::Result<std::sync::Arc<dyn $crate::storage::Storage>> {
                match &self.storage {
                    Some(storage) => Ok(storage.clone()),
                    None => $crate::services::storage_from_request(request),
                }
            }
        }
    };
}
pub(crate) use lazy_storage_service;

pub mod access;
pub mod admissions;
pub mod attendance;
pub mod auth;
pub mod enrollments;
pub mod fees;
pub mod notifications;
pub mod profiles;
pub mod results;
pub mod students;
pub mod teachers;

pub use admissions::AdmissionService;
pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use enrollments::EnrollmentService;
pub use fees::FeeService;
pub use notifications::NotificationService;
pub use profiles::ProfileService;
pub use results::ResultService;
pub use students::StudentService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::SchoolSyncError;
use crate::middlewares::require_jwt::user_cache_key;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not configured"))
}

/// 存储层错误转换为响应：唯一约束冲突返回 409（使用传入的业务码），其余一律 500
pub(crate) fn storage_error(code: ErrorCode, context: &str, err: SchoolSyncError) -> HttpResponse {
    match err {
        SchoolSyncError::Conflict(_) => HttpResponse::Conflict()
            .json(ApiResponse::error_empty(code, format!("{context}: record already exists"))),
        SchoolSyncError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        other => {
            tracing::error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", other.message()),
            ))
        }
    }
}

/// 清除已认证用户缓存，使修改或删除立即对后续请求生效
pub(crate) async fn evict_cached_user(request: &HttpRequest, user_id: i64) {
    if let Some(cache) = request.app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>() {
        cache.remove(&user_cache_key(user_id)).await;
    }
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn conflict(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn forbidden(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode};

    async fn body_code(resp: HttpResponse) -> i64 {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        value["code"].as_i64().unwrap()
    }

    #[actix_web::test]
    async fn test_storage_error_codes() {
        let resp = storage_error(
            ErrorCode::ResultAlreadyExists,
            "Failed to upload result",
            SchoolSyncError::conflict("UNIQUE constraint failed"),
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(body_code(resp).await, ErrorCode::ResultAlreadyExists as i64);

        // 数据库故障不沿用业务码
        let resp = storage_error(
            ErrorCode::ResultAlreadyExists,
            "Failed to upload result",
            SchoolSyncError::database_operation("disk I/O error"),
        );
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_code(resp).await, ErrorCode::InternalServerError as i64);
    }
}
