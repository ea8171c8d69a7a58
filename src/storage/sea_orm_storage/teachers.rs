use super::{SeaOrmStorage, db_error};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::entity::users::Entity as Users;
use crate::errors::Result;
use crate::models::{
    teachers::{entities::Teacher, requests::UpdateTeacherRequest},
    users::requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 同一事务内创建用户与教师档案
    pub async fn create_teacher_impl(
        &self,
        user: CreateUserRequest,
        subject: Option<String>,
        qualification: Option<String>,
    ) -> Result<Teacher> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let email = user.email.clone();
        let phone = user.phone.clone();
        let user_model = Self::insert_user(&txn, user).await?;
        let now = chrono::Utc::now().timestamp();

        let teacher = ActiveModel {
            user_id: Set(user_model.id),
            subject: Set(subject),
            qualification: Set(qualification),
            email: Set(Some(email)),
            phone: Set(phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| db_error("Failed to create teacher", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit teacher", e))?;

        Ok(teacher.into_teacher(user_model.username))
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query teacher", e))?;

        Ok(result.map(|(t, u)| t.into_teacher(u.map(|u| u.username).unwrap_or_default())))
    }

    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query teacher", e))?;

        Ok(result.map(|(t, u)| t.into_teacher(u.map(|u| u.username).unwrap_or_default())))
    }

    pub async fn list_teachers_impl(&self) -> Result<Vec<Teacher>> {
        let rows = Teachers::find()
            .find_also_related(Users)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list teachers", e))?;

        Ok(rows
            .into_iter()
            .map(|(t, u)| t.into_teacher(u.map(|u| u.username).unwrap_or_default()))
            .collect())
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query teacher", e))?
        else {
            return Ok(None);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        Self::apply_user_update(
            &txn,
            existing.user_id,
            UpdateUserRequest {
                email: update.email.clone(),
                phone: update.phone.clone(),
                password: update.password,
            },
        )
        .await?;

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(email) = update.email {
            model.email = Set(Some(email));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(subject) = update.subject {
            model.subject = Set(Some(subject));
        }
        if let Some(qualification) = update.qualification {
            model.qualification = Set(Some(qualification));
        }

        model
            .update(&txn)
            .await
            .map_err(|e| db_error("Failed to update teacher", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit teacher", e))?;

        self.get_teacher_by_id_impl(id).await
    }

    /// 删除教师及其用户
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query teacher", e))?
        else {
            return Ok(false);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        Teachers::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("Failed to delete teacher", e))?;
        Users::delete_by_id(existing.user_id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit deletion", e))?;

        Ok(true)
    }
}
