use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::notifications::responses::UnreadCountResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, ListResponse};
use crate::services::access::{current_user, ensure_admin_or_self};
use crate::services::{forbidden, not_found, storage_error, try_or_respond};

super::lazy_storage_service!(NotificationService);

impl NotificationService {
    /// 某用户的通知，最新在前
    pub async fn list(
        &self,
        request: &HttpRequest,
        user_id: i64,
        unread_only: bool,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = try_or_respond!(current_user(request));
        try_or_respond!(ensure_admin_or_self(&user, user_id));

        match storage.list_notifications(user_id, unread_only).await {
            Ok(notifications) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                ListResponse::new(notifications),
                "Notifications retrieved successfully",
            ))),
            Err(e) => Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to list notifications",
                e,
            )),
        }
    }

    pub async fn unread_count(
        &self,
        request: &HttpRequest,
        user_id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = try_or_respond!(current_user(request));
        try_or_respond!(ensure_admin_or_self(&user, user_id));

        match storage.count_unread_notifications(user_id).await {
            Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                UnreadCountResponse { count },
                "Unread count retrieved successfully",
            ))),
            Err(e) => Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to count notifications",
                e,
            )),
        }
    }

    pub async fn mark_read(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = try_or_respond!(current_user(request));

        let notification = match storage.get_notification_by_id(id).await {
            Ok(Some(notification)) => notification,
            Ok(None) => {
                return Ok(not_found(
                    ErrorCode::NotificationNotFound,
                    "Notification not found",
                ));
            }
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::NotificationNotFound,
                    "Failed to load notification",
                    e,
                ));
            }
        };

        if user.role != UserRole::Admin && notification.user_id != user.id {
            return Ok(forbidden("You can only update your own notifications"));
        }

        match storage.mark_notification_read(id).await {
            Ok(Some(notification)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                notification,
                "Notification marked as read",
            ))),
            Ok(None) => Ok(not_found(
                ErrorCode::NotificationNotFound,
                "Notification not found",
            )),
            Err(e) => Ok(storage_error(
                ErrorCode::NotificationNotFound,
                "Failed to update notification",
                e,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::entities::NotificationType;
    use crate::models::users::{entities::User, requests::CreateUserRequest};
    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};
    use actix_web::{HttpMessage, http::StatusCode, test::TestRequest};
    use std::sync::Arc;

    async fn create_user(storage: &Arc<dyn Storage>, username: &str) -> User {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@school.edu.in"),
                phone: None,
                password: "hash".to_string(),
                role: UserRole::Teacher,
            })
            .await
            .unwrap()
    }

    fn request_as(user: &User) -> HttpRequest {
        let request = TestRequest::default().to_http_request();
        request.extensions_mut().insert(user.clone());
        request
    }

    #[actix_web::test]
    async fn test_mark_read_only_by_owner() {
        let storage: Arc<dyn Storage> = Arc::new(
            SeaOrmStorage::connect("sqlite::memory:", 1, 5)
                .await
                .unwrap(),
        );
        let owner = create_user(&storage, "owner").await;
        let other = create_user(&storage, "other").await;
        let notification = storage
            .create_notification(
                owner.id,
                "Absent on 2025-07-14".to_string(),
                NotificationType::Absence,
            )
            .await
            .unwrap();

        let service = NotificationService::with_storage(storage.clone());

        let resp = service
            .mark_read(&request_as(&other), notification.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = service
            .unread_count(&request_as(&other), owner.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let resp = service
            .mark_read(&request_as(&owner), notification.id)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(storage.count_unread_notifications(owner.id).await.unwrap(), 0);

        let resp = service.mark_read(&request_as(&owner), 9999).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
