use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::{MeResponse, RefreshTokenResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::current_user;
use crate::services::{storage_error, try_or_respond};
use crate::utils::jwt;

use super::{AuthService, linked_profile_ids};

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = jwt::JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    // 验证 refresh token 并生成新的 access token
    match jwt::JwtUtils::refresh_access_token(&refresh_token) {
        Ok(new_access_token) => {
            let response = RefreshTokenResponse {
                access_token: new_access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::warn!("Refresh token failed: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = jwt::JwtUtils::create_empty_refresh_token_cookie();

            Ok(HttpResponse::Unauthorized()
                .cookie(empty_cookie)
                .json(ApiResponse::error_empty(
                    ErrorCode::Unauthorized,
                    "Login expired or invalid, please login again",
                )))
        }
    }
}

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_or_respond!(current_user(request));

    let (student_id, teacher_id) = try_or_respond!(
        linked_profile_ids(&storage, &user)
            .await
            .map_err(|e| storage_error(ErrorCode::UserNotFound, "Failed to load profile", e))
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MeResponse {
            user,
            student_id,
            teacher_id,
        },
        "User information retrieved successfully",
    )))
}
