pub mod login;
pub mod logout;
pub mod register;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::auth::{LoginRequest, RegisterRequest};

super::lazy_storage_service!(AuthService);

impl AuthService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 自助注册（学生/教师）
    pub async fn register(
        &self,
        register_request: RegisterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, register_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 当前用户信息
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_me(self, request).await
    }

    pub async fn logout(&self) -> ActixResult<HttpResponse> {
        logout::handle_logout().await
    }
}

/// 登录/注册成功后附带的学生、教师档案 ID
pub(crate) async fn linked_profile_ids(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    user: &crate::models::users::entities::User,
) -> crate::errors::Result<(Option<i64>, Option<i64>)> {
    use crate::models::users::entities::UserRole;

    match user.role {
        UserRole::Student => Ok((
            storage.get_student_by_user_id(user.id).await?.map(|s| s.id),
            None,
        )),
        UserRole::Teacher => Ok((
            None,
            storage.get_teacher_by_user_id(user.id).await?.map(|t| t.id),
        )),
        UserRole::Admin => Ok((None, None)),
    }
}
