//! 路径参数安全提取
//!
//! 路径中的 ID 无法解析为正整数时直接返回 400，而不是 actix 默认的 404。

use actix_web::{HttpResponse, error::InternalError};

use crate::models::{ApiResponse, ErrorCode};

pub(crate) fn invalid_path_param(name: &str) -> actix_web::Error {
    InternalError::from_response(
        format!("invalid path parameter: {name}"),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            format!("Invalid path parameter '{name}'"),
        )),
    )
    .into()
}

/// 定义从路径中提取正整数 ID 的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = actix_web::Error;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);
                std::future::ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err($crate::utils::extractor::invalid_path_param($param)),
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");
define_safe_i64_extractor!(SafeStudentIdI64, "student_id");
define_safe_i64_extractor!(SafeUserIdI64, "user_id");

/// 班级名路径参数（非空，去除首尾空白）
pub struct SafeClassName(pub String);

impl actix_web::FromRequest for SafeClassName {
    type Error = actix_web::Error;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let value = req
            .match_info()
            .get("class_name")
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= 64)
            .map(str::to_string);
        std::future::ready(
            value
                .map(SafeClassName)
                .ok_or_else(|| invalid_path_param("class_name")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{FromRequest, test::TestRequest};

    #[actix_web::test]
    async fn test_valid_id() {
        let req = TestRequest::default().param("id", "15").to_http_request();
        let id = SafeIDI64::extract(&req).await.unwrap();
        assert_eq!(id.0, 15);
    }

    #[actix_web::test]
    async fn test_invalid_ids_rejected() {
        for raw in ["abc", "0", "-3"] {
            let req = TestRequest::default().param("id", raw).to_http_request();
            assert!(SafeIDI64::extract(&req).await.is_err());
        }
    }

    #[actix_web::test]
    async fn test_class_name() {
        let req = TestRequest::default()
            .param("class_name", " 10A ")
            .to_http_request();
        assert_eq!(SafeClassName::extract(&req).await.unwrap().0, "10A");
    }
}
