use super::{SeaOrmStorage, db_error};
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::Result;
use crate::models::notifications::entities::{Notification, NotificationType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn create_notification_impl(
        &self,
        user_id: i64,
        message: String,
        notification_type: NotificationType,
    ) -> Result<Notification> {
        let model = ActiveModel {
            user_id: Set(user_id),
            message: Set(message),
            notification_type: Set(notification_type.to_string()),
            is_read: Set(false),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("Failed to create notification", e))?;

        Ok(model.into_notification())
    }

    pub async fn get_notification_by_id_impl(&self, id: i64) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query notification", e))?;

        Ok(result.map(|m| m.into_notification()))
    }

    /// 新的在前
    pub async fn list_notifications_impl(
        &self,
        user_id: i64,
        unread_only: bool,
    ) -> Result<Vec<Notification>> {
        let mut select = Notifications::find().filter(Column::UserId.eq(user_id));
        if unread_only {
            select = select.filter(Column::IsRead.eq(false));
        }

        let rows = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list notifications", e))?;

        Ok(rows.into_iter().map(|m| m.into_notification()).collect())
    }

    pub async fn mark_notification_read_impl(&self, id: i64) -> Result<Option<Notification>> {
        let exists = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query notification", e))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let updated = ActiveModel {
            id: Set(id),
            is_read: Set(true),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| db_error("Failed to update notification", e))?;

        Ok(Some(updated.into_notification()))
    }

    pub async fn count_unread_notifications_impl(&self, user_id: i64) -> Result<u64> {
        Notifications::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to count notifications", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};

    #[tokio::test]
    async fn test_unread_flow() {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");
        let user = storage
            .create_user_impl(CreateUserRequest {
                username: "asha".into(),
                email: "asha@school.in".into(),
                phone: None,
                password: "hash".into(),
                role: UserRole::Student,
            })
            .await
            .unwrap();

        let first = storage
            .create_notification_impl(user.id, "first".into(), NotificationType::Absence)
            .await
            .unwrap();
        storage
            .create_notification_impl(user.id, "second".into(), NotificationType::AbsenceUpdate)
            .await
            .unwrap();
        assert_eq!(storage.count_unread_notifications_impl(user.id).await.unwrap(), 2);

        let read = storage.mark_notification_read_impl(first.id).await.unwrap().unwrap();
        assert!(read.is_read);

        let unread = storage.list_notifications_impl(user.id, true).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].message, "second");

        let all = storage.list_notifications_impl(user.id, false).await.unwrap();
        assert_eq!(all[0].message, "second");
    }
}
