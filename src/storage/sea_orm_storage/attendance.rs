use super::{SeaOrmStorage, db_error};
use crate::entity::attendance::{ActiveModel, Column, Entity as Attendance, Model};
use crate::entity::students::Column as StudentColumn;
use crate::errors::Result;
use crate::models::attendance::{
    entities::{AttendanceRecord, AttendanceStatus},
    requests::AttendanceListQuery,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

impl SeaOrmStorage {
    /// 附加学生信息，转换为业务记录
    async fn attendance_records(&self, rows: Vec<Model>) -> Result<Vec<AttendanceRecord>> {
        let summaries = self
            .student_summaries(rows.iter().map(|m| m.student_id))
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let student = summaries.get(&m.student_id)?;
                Some(m.into_record(student))
            })
            .collect())
    }

    /// 新增考勤；同一学生同一天重复写入由唯一索引拦截为 Conflict
    pub async fn create_attendance_impl(
        &self,
        student_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(student_id),
            date: Set(date),
            status: Set(status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("Failed to mark attendance", e))?;

        let mut records = self.attendance_records(vec![model]).await?;
        records.pop().ok_or_else(|| {
            crate::errors::SchoolSyncError::not_found(format!("Student {student_id} not found"))
        })
    }

    pub async fn attendance_exists_impl(&self, student_id: i64, date: NaiveDate) -> Result<bool> {
        let count = Attendance::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Date.eq(date))
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to check attendance", e))?;

        Ok(count > 0)
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        let Some(model) = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query attendance", e))?
        else {
            return Ok(None);
        };

        Ok(self.attendance_records(vec![model]).await?.pop())
    }

    /// 按学生、日期、班级筛选，日期倒序
    pub async fn list_attendance_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut select = Attendance::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }

        if let Some(class_name) = query.class_name.as_deref().map(str::trim)
            && !class_name.is_empty()
        {
            select = select
                .join(
                    JoinType::InnerJoin,
                    crate::entity::attendance::Relation::Students.def(),
                )
                .filter(StudentColumn::ClassName.eq(class_name));
        }

        let rows = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list attendance", e))?;

        self.attendance_records(rows).await
    }

    /// 整体替换学生、日期与状态
    pub async fn update_attendance_impl(
        &self,
        id: i64,
        student_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>> {
        let exists = Attendance::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query attendance", e))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            student_id: Set(student_id),
            date: Set(date),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| db_error("Failed to update attendance", e))?;

        Ok(self.attendance_records(vec![model]).await?.pop())
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = Attendance::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete attendance", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SchoolSyncError;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};

    async fn storage_with_student() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");
        let student = storage
            .create_student_impl(
                CreateUserRequest {
                    username: "asha".into(),
                    email: "asha@school.in".into(),
                    phone: None,
                    password: "hash".into(),
                    role: UserRole::Student,
                },
                "2501".into(),
                "10-A".into(),
            )
            .await
            .unwrap();
        (storage, student.id)
    }

    #[tokio::test]
    async fn test_duplicate_attendance_is_conflict() {
        let (storage, student_id) = storage_with_student().await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

        let record = storage
            .create_attendance_impl(student_id, date, AttendanceStatus::Present)
            .await
            .unwrap();
        assert_eq!(record.student_name, "asha");
        assert_eq!(record.class_name, "10-A");
        assert!(storage.attendance_exists_impl(student_id, date).await.unwrap());

        let err = storage
            .create_attendance_impl(student_id, date, AttendanceStatus::Absent)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolSyncError::Conflict(_)));

        // 原记录保持不变
        let kept = storage.get_attendance_by_id_impl(record.id).await.unwrap().unwrap();
        assert_eq!(kept.status, AttendanceStatus::Present);
    }

    #[tokio::test]
    async fn test_list_attendance_by_class() {
        let (storage, student_id) = storage_with_student().await;
        let date = NaiveDate::from_ymd_opt(2025, 7, 2).unwrap();
        storage
            .create_attendance_impl(student_id, date, AttendanceStatus::Absent)
            .await
            .unwrap();

        let in_class = storage
            .list_attendance_impl(AttendanceListQuery {
                student_id: None,
                date: Some(date),
                class_name: Some("10-A".into()),
            })
            .await
            .unwrap();
        assert_eq!(in_class.len(), 1);

        let other_class = storage
            .list_attendance_impl(AttendanceListQuery {
                student_id: None,
                date: Some(date),
                class_name: Some("9-B".into()),
            })
            .await
            .unwrap();
        assert!(other_class.is_empty());
    }
}
