use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 学籍状态
    EnrollmentStatus {
        Active => "Active",
        Completed => "Completed",
        Transferred => "Transferred",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub roll_no: String,
    pub academic_year: String,
    pub class_name: String,
    pub section: String,
    pub enrollment_date: NaiveDate,
    pub status: EnrollmentStatus,
    pub remarks: Option<String>,
}
