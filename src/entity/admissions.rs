//! 入学申请实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub application_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Date,
    pub gender: String,
    pub email: String,
    pub phone: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub applied_class: String,
    pub academic_year: String,
    pub father_name: String,
    pub father_occupation: Option<String>,
    pub father_phone: Option<String>,
    pub mother_name: String,
    pub mother_occupation: Option<String>,
    pub mother_phone: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_relation: Option<String>,
    pub guardian_phone: Option<String>,
    pub previous_school: Option<String>,
    pub previous_class: Option<String>,
    pub previous_marks: Option<f64>,
    pub status: String,
    pub application_date: i64,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    #[sea_orm(unique)]
    pub roll_number: Option<String>,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_admission(self) -> crate::models::admissions::entities::Admission {
        use crate::models::admissions::entities::{Admission, AdmissionStatus};

        let full_name = format!("{} {}", self.first_name, self.last_name);
        Admission {
            id: self.id,
            application_number: self.application_number,
            first_name: self.first_name,
            last_name: self.last_name,
            full_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            applied_class: self.applied_class,
            academic_year: self.academic_year,
            father_name: self.father_name,
            father_occupation: self.father_occupation,
            father_phone: self.father_phone,
            mother_name: self.mother_name,
            mother_occupation: self.mother_occupation,
            mother_phone: self.mother_phone,
            guardian_name: self.guardian_name,
            guardian_relation: self.guardian_relation,
            guardian_phone: self.guardian_phone,
            previous_school: self.previous_school,
            previous_class: self.previous_class,
            previous_marks: self.previous_marks,
            status: self
                .status
                .parse::<AdmissionStatus>()
                .unwrap_or(AdmissionStatus::Pending),
            application_date: super::timestamp_to_datetime(self.application_date),
            remarks: self.remarks,
            roll_number: self.roll_number,
        }
    }
}
