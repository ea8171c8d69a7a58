use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::EnrollmentStatus;

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub academic_year: String,
    pub class_name: String,
    pub section: String,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<EnrollmentStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    pub academic_year: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<EnrollmentStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentListQuery {
    pub student_id: Option<i64>,
}
