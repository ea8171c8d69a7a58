use super::{SeaOrmStorage, db_error};
use crate::entity::admissions::{ActiveModel, Column, Entity as Admissions};
use crate::errors::Result;
use crate::models::admissions::{
    entities::{Admission, AdmissionStatus},
    requests::{AdmissionListQuery, ApplyAdmissionRequest},
};
use crate::utils::non_empty;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 保存申请，初始状态 Pending
    pub async fn create_admission_impl(
        &self,
        req: ApplyAdmissionRequest,
        application_number: String,
    ) -> Result<Admission> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            application_number: Set(application_number),
            first_name: Set(req.first_name.trim().to_string()),
            last_name: Set(req.last_name.trim().to_string()),
            date_of_birth: Set(req.date_of_birth),
            gender: Set(req.gender),
            email: Set(req.email.trim().to_lowercase()),
            phone: Set(req.phone.trim().to_string()),
            address: Set(req.address.trim().to_string()),
            city: Set(req.city.trim().to_string()),
            state: Set(req.state.trim().to_string()),
            pincode: Set(req.pincode),
            applied_class: Set(req.applied_class.trim().to_string()),
            academic_year: Set(req.academic_year),
            father_name: Set(req.father_name.trim().to_string()),
            father_occupation: Set(non_empty(req.father_occupation)),
            father_phone: Set(non_empty(req.father_phone)),
            mother_name: Set(req.mother_name.trim().to_string()),
            mother_occupation: Set(non_empty(req.mother_occupation)),
            mother_phone: Set(non_empty(req.mother_phone)),
            guardian_name: Set(non_empty(req.guardian_name)),
            guardian_relation: Set(non_empty(req.guardian_relation)),
            guardian_phone: Set(non_empty(req.guardian_phone)),
            previous_school: Set(non_empty(req.previous_school)),
            previous_class: Set(non_empty(req.previous_class)),
            previous_marks: Set(req.previous_marks),
            status: Set(AdmissionStatus::Pending.to_string()),
            application_date: Set(now),
            remarks: Set(None),
            roll_number: Set(None),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("Failed to submit application", e))?;

        Ok(model.into_admission())
    }

    pub async fn get_admission_by_id_impl(&self, id: i64) -> Result<Option<Admission>> {
        let result = Admissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query application", e))?;

        Ok(result.map(|m| m.into_admission()))
    }

    /// 邮箱或手机号任一匹配，取最近一次申请
    pub async fn find_admission_by_contact_impl(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Admission>> {
        let mut condition = Condition::any();
        let mut has_filter = false;

        if let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) {
            condition = condition.add(Column::Email.eq(email.to_lowercase()));
            has_filter = true;
        }
        if let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) {
            condition = condition.add(Column::Phone.eq(phone));
            has_filter = true;
        }
        if !has_filter {
            return Ok(None);
        }

        let result = Admissions::find()
            .filter(condition)
            .order_by_desc(Column::ApplicationDate)
            .order_by_desc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query application", e))?;

        Ok(result.map(|m| m.into_admission()))
    }

    pub async fn list_admissions_impl(&self, query: AdmissionListQuery) -> Result<Vec<Admission>> {
        let mut select = Admissions::find();
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let rows = select
            .order_by_desc(Column::ApplicationDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list applications", e))?;

        Ok(rows.into_iter().map(|m| m.into_admission()).collect())
    }

    /// 更新状态；remarks 与 roll_number 为 None 时保持原值
    pub async fn update_admission_status_impl(
        &self,
        id: i64,
        status: AdmissionStatus,
        remarks: Option<String>,
        roll_number: Option<String>,
    ) -> Result<Option<Admission>> {
        let exists = Admissions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query application", e))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            status: Set(status.to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(remarks) = remarks {
            model.remarks = Set(non_empty(Some(remarks)));
        }
        if let Some(roll_number) = roll_number {
            model.roll_number = Set(Some(roll_number));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update application", e))?;

        Ok(Some(updated.into_admission()))
    }

    pub async fn delete_admission_impl(&self, id: i64) -> Result<bool> {
        let result = Admissions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete application", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn application(email: &str, phone: &str) -> ApplyAdmissionRequest {
        ApplyAdmissionRequest {
            first_name: "Meera".into(),
            last_name: "Iyer".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2015, 5, 20).unwrap(),
            gender: "Female".into(),
            email: email.into(),
            phone: phone.into(),
            address: "12 Lake View Road".into(),
            city: "Chennai".into(),
            state: "Tamil Nadu".into(),
            pincode: "600001".into(),
            applied_class: "5".into(),
            academic_year: "2025-2026".into(),
            father_name: "Ravi Iyer".into(),
            father_occupation: None,
            father_phone: Some("  ".into()),
            mother_name: "Lata Iyer".into(),
            mother_occupation: None,
            mother_phone: None,
            guardian_name: None,
            guardian_relation: None,
            guardian_phone: None,
            previous_school: None,
            previous_class: None,
            previous_marks: Some(88.5),
        }
    }

    #[tokio::test]
    async fn test_apply_and_check_status() {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");

        let created = storage
            .create_admission_impl(application("Meera@Mail.com", "9876501234"), "APP1".into())
            .await
            .unwrap();
        assert_eq!(created.status, AdmissionStatus::Pending);
        assert_eq!(created.full_name, "Meera Iyer");
        assert_eq!(created.father_phone, None);

        let by_email = storage
            .find_admission_by_contact_impl(Some("meera@mail.com"), None)
            .await
            .unwrap();
        assert_eq!(by_email.map(|a| a.application_number), Some("APP1".to_string()));

        let by_phone = storage
            .find_admission_by_contact_impl(None, Some("9876501234"))
            .await
            .unwrap();
        assert!(by_phone.is_some());
        assert!(
            storage
                .find_admission_by_contact_impl(None, None)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_approval_keeps_roll_number_unique() {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");
        let first = storage
            .create_admission_impl(application("a@mail.com", "9876501234"), "APP1".into())
            .await
            .unwrap();
        let second = storage
            .create_admission_impl(application("b@mail.com", "9876501235"), "APP2".into())
            .await
            .unwrap();

        let approved = storage
            .update_admission_status_impl(
                first.id,
                AdmissionStatus::Approved,
                Some("Welcome".into()),
                Some("2501".into()),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.roll_number.as_deref(), Some("2501"));

        let err = storage
            .update_admission_status_impl(
                second.id,
                AdmissionStatus::Approved,
                None,
                Some("2501".into()),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, crate::errors::SchoolSyncError::Conflict(_)));
    }
}
