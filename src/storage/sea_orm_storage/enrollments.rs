use super::{SeaOrmStorage, db_error};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::errors::{Result, SchoolSyncError};
use crate::models::enrollments::{
    entities::{Enrollment, EnrollmentStatus},
    requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
};
use crate::utils::{non_empty, today};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn enrollment_records(&self, rows: Vec<Model>) -> Result<Vec<Enrollment>> {
        let summaries = self
            .student_summaries(rows.iter().map(|m| m.student_id))
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let student = summaries.get(&m.student_id)?;
                Some(m.into_enrollment(student))
            })
            .collect())
    }

    pub async fn create_enrollment_impl(&self, req: CreateEnrollmentRequest) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            academic_year: Set(req.academic_year.trim().to_string()),
            class_name: Set(req.class_name.trim().to_string()),
            section: Set(req.section.trim().to_string()),
            enrollment_date: Set(req.enrollment_date.unwrap_or_else(today)),
            status: Set(req.status.unwrap_or(EnrollmentStatus::Active).to_string()),
            remarks: Set(non_empty(req.remarks)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("Failed to create enrollment", e))?;

        let student_id = model.student_id;
        self.enrollment_records(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolSyncError::not_found(format!("Student {student_id} not found")))
    }

    pub async fn get_enrollment_by_id_impl(&self, id: i64) -> Result<Option<Enrollment>> {
        let Some(model) = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query enrollment", e))?
        else {
            return Ok(None);
        };

        Ok(self.enrollment_records(vec![model]).await?.pop())
    }

    /// 最近一次注册（按注册日期，再按 ID）
    pub async fn get_latest_enrollment_impl(&self, student_id: i64) -> Result<Option<Enrollment>> {
        let Some(model) = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::EnrollmentDate)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query enrollment", e))?
        else {
            return Ok(None);
        };

        Ok(self.enrollment_records(vec![model]).await?.pop())
    }

    pub async fn list_enrollments_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<Vec<Enrollment>> {
        let mut select = Enrollments::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        let rows = select
            .order_by_desc(Column::EnrollmentDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list enrollments", e))?;

        self.enrollment_records(rows).await
    }

    pub async fn update_enrollment_impl(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        let exists = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query enrollment", e))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(academic_year) = non_empty(update.academic_year) {
            model.academic_year = Set(academic_year);
        }
        if let Some(class_name) = non_empty(update.class_name) {
            model.class_name = Set(class_name);
        }
        if let Some(section) = non_empty(update.section) {
            model.section = Set(section);
        }
        if let Some(enrollment_date) = update.enrollment_date {
            model.enrollment_date = Set(enrollment_date);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(non_empty(Some(remarks)));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update enrollment", e))?;

        Ok(self.enrollment_records(vec![updated]).await?.pop())
    }

    pub async fn delete_enrollment_impl(&self, id: i64) -> Result<bool> {
        let result = Enrollments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete enrollment", e))?;

        Ok(result.rows_affected > 0)
    }
}
