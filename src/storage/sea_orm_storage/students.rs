use std::collections::HashMap;

use super::{SeaOrmStorage, db_error};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{Result, SchoolSyncError};
use crate::models::{
    students::{
        entities::{Student, StudentSummary},
        requests::{StudentListQuery, UpdateStudentRequest},
    },
    users::requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 批量加载学生摘要（姓名、学号、班级）
    pub(crate) async fn student_summaries(
        &self,
        ids: impl IntoIterator<Item = i64>,
    ) -> Result<HashMap<i64, StudentSummary>> {
        let mut ids: Vec<i64> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = Students::find()
            .filter(Column::Id.is_in(ids))
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to query students", e))?;

        Ok(rows
            .into_iter()
            .map(|(student, user)| {
                let username = user.map(|u| u.username).unwrap_or_default();
                (student.id, student.summary(&username))
            })
            .collect())
    }

    /// 同一事务内创建用户与学生
    pub async fn create_student_impl(
        &self,
        user: CreateUserRequest,
        roll_no: String,
        class_name: String,
    ) -> Result<Student> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        let email = user.email.clone();
        let phone = user.phone.clone();
        let user_model = Self::insert_user(&txn, user).await?;
        let now = chrono::Utc::now().timestamp();

        let student = ActiveModel {
            user_id: Set(user_model.id),
            roll_no: Set(roll_no),
            class_name: Set(class_name),
            email: Set(Some(email)),
            phone: Set(phone),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| db_error("Failed to create student", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit student", e))?;

        Ok(student.into_student(user_model.username))
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query student", e))?;

        Ok(result.map(|(s, u)| s.into_student(u.map(|u| u.username).unwrap_or_default())))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query student", e))?;

        Ok(result.map(|(s, u)| s.into_student(u.map(|u| u.username).unwrap_or_default())))
    }

    pub async fn student_roll_exists_impl(
        &self,
        roll_no: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Students::find().filter(Column::RollNo.eq(roll_no));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to check roll number", e))?;

        Ok(count > 0)
    }

    pub async fn student_phone_exists_impl(
        &self,
        phone: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Students::find().filter(Column::Phone.eq(phone));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to check student phone", e))?;

        Ok(count > 0)
    }

    /// 按班级、关键字（学号或用户名）列出学生
    pub async fn list_students_impl(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        let mut select = Students::find().find_also_related(Users);

        if let Some(class_name) = query.class_name.as_deref().map(str::trim)
            && !class_name.is_empty()
        {
            select = select.filter(Column::ClassName.eq(class_name));
        }

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(Column::RollNo.contains(search))
                    .add(UserColumn::Username.contains(search)),
            );
        }

        let rows = select
            .order_by_asc(Column::ClassName)
            .order_by_asc(Column::RollNo)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list students", e))?;

        Ok(rows
            .into_iter()
            .map(|(s, u)| s.into_student(u.map(|u| u.username).unwrap_or_default()))
            .collect())
    }

    pub async fn list_class_names_impl(&self) -> Result<Vec<String>> {
        Students::find()
            .select_only()
            .column(Column::ClassName)
            .distinct()
            .order_by_asc(Column::ClassName)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list classes", e))
    }

    /// 部分更新学生，邮箱、手机号、密码同步到用户表
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query student", e))?
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
        if let Some(roll_no) = update.roll_no {
            model.roll_no = Set(roll_no);
        }
        if let Some(class_name) = update.class_name {
            model.class_name = Set(class_name);
        }

        model
            .update(&txn)
            .await
            .map_err(|e| db_error("Failed to update student", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit student", e))?;

        self.get_student_by_id_impl(id).await
    }

    /// 删除学生及其用户
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let Some(existing) = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query student", e))?
        else {
            return Ok(false);
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))?;

        Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("Failed to delete student", e))?;
        let result = Users::delete_by_id(existing.user_id)
            .exec(&txn)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit deletion", e))?;

        if result.rows_affected == 0 {
            return Err(SchoolSyncError::not_found(format!(
                "User {} of student {id} not found",
                existing.user_id
            )));
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database")
    }

    fn student_user(username: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: email.to_string(),
            phone: Some("9876543210".to_string()),
            password: "hash".to_string(),
            role: UserRole::Student,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_students() {
        let storage = storage().await;
        storage
            .create_student_impl(student_user("asha", "asha@school.in"), "2501".into(), "10-A".into())
            .await
            .unwrap();
        storage
            .create_student_impl(student_user("bala", "bala@school.in"), "2502".into(), "9-B".into())
            .await
            .unwrap();

        let all = storage
            .list_students_impl(StudentListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let tenth = storage
            .list_students_impl(StudentListQuery {
                class_name: Some("10-A".into()),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(tenth.len(), 1);
        assert_eq!(tenth[0].username, "asha");

        let classes = storage.list_class_names_impl().await.unwrap();
        assert_eq!(classes, vec!["10-A".to_string(), "9-B".to_string()]);

        assert!(storage.student_roll_exists_impl("2501", None).await.unwrap());
        assert!(
            !storage
                .student_roll_exists_impl("2501", Some(tenth[0].id))
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_duplicate_roll_number_rolls_back_user() {
        let storage = storage().await;
        storage
            .create_student_impl(student_user("asha", "asha@school.in"), "2501".into(), "10-A".into())
            .await
            .unwrap();

        let err = storage
            .create_student_impl(student_user("bala", "bala@school.in"), "2501".into(), "10-A".into())
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolSyncError::Conflict(_)));

        // 事务回滚后用户表不应残留
        assert!(storage.get_user_by_username_impl("bala").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_student_removes_user() {
        let storage = storage().await;
        let student = storage
            .create_student_impl(student_user("asha", "asha@school.in"), "2501".into(), "10-A".into())
            .await
            .unwrap();

        assert!(storage.delete_student_impl(student.id).await.unwrap());
        assert!(storage.get_user_by_id_impl(student.user_id).await.unwrap().is_none());
        assert!(!storage.delete_student_impl(student.id).await.unwrap());
    }
}
