//! 资源级访问控制
//!
//! 角色粗粒度校验由 RequireRole 中间件完成，这里处理“本人或教职工”一类规则。

use actix_web::{HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    students::entities::Student,
    users::entities::{User, UserRole},
};
use crate::storage::Storage;

use super::{forbidden, storage_error};

/// 当前登录用户，缺失时返回 401
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user_claims(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        ))
    })
}

/// 当前学生用户对应的学生档案
pub(crate) async fn own_student(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<Option<Student>, HttpResponse> {
    if user.role != UserRole::Student {
        return Ok(None);
    }
    storage
        .get_student_by_user_id(user.id)
        .await
        .map_err(|e| storage_error(ErrorCode::StudentNotFound, "Failed to load student", e))
}

/// 教职工可访问任意学生；学生只能访问自己
pub(crate) async fn ensure_student_access(
    storage: &Arc<dyn Storage>,
    user: &User,
    student_id: i64,
) -> Result<(), HttpResponse> {
    if user.role.is_staff() {
        return Ok(());
    }
    match own_student(storage, user).await? {
        Some(student) if student.id == student_id => Ok(()),
        _ => Err(forbidden("You can only access your own records")),
    }
}

/// 管理员可访问任意学生；学生只能访问自己（费用类接口不对教师开放）
pub(crate) async fn ensure_admin_or_owning_student(
    storage: &Arc<dyn Storage>,
    user: &User,
    student_id: i64,
) -> Result<(), HttpResponse> {
    if user.role == UserRole::Admin {
        return Ok(());
    }
    match own_student(storage, user).await? {
        Some(student) if student.id == student_id => Ok(()),
        _ => Err(forbidden("You can only access your own fee records")),
    }
}

/// 管理员或本人
pub(crate) fn ensure_admin_or_self(user: &User, user_id: i64) -> Result<(), HttpResponse> {
    if user.role == UserRole::Admin || user.id == user_id {
        Ok(())
    } else {
        Err(forbidden("You can only access your own notifications"))
    }
}
