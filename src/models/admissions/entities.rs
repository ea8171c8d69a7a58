use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 每年可分配的最大学号序号
pub const MAX_ROLL_SEQUENCE: u32 = 99;

crate::define_string_enum! {
    /// 入学申请状态
    AdmissionStatus {
        Pending => "Pending",
        UnderReview => "Under Review",
        Approved => "Approved",
        Rejected => "Rejected",
    }
}

// 入学申请
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admission.ts")]
pub struct Admission {
    pub id: i64,
    pub application_number: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub email: String,
    pub phone: String,
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
    pub status: AdmissionStatus,
    pub application_date: chrono::DateTime<chrono::Utc>,
    pub remarks: Option<String>,
    pub roll_number: Option<String>,
}

pub fn generate_application_number(now_millis: i64) -> String {
    format!("APP{now_millis}")
}

/// 学号格式：年份后两位 + 两位序号，如 2025 年第 3 个为 "2503"
pub fn format_roll_number(year: i32, sequence: u32) -> String {
    format!("{:02}{:02}", year.rem_euclid(100), sequence)
}

/// 取第一个未被占用的学号
pub fn first_free_roll_number<F>(year: i32, mut is_taken: F) -> Option<String>
where
    F: FnMut(&str) -> bool,
{
    (1..=MAX_ROLL_SEQUENCE)
        .map(|seq| format_roll_number(year, seq))
        .find(|candidate| !is_taken(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_number_format() {
        assert_eq!(format_roll_number(2025, 1), "2501");
        assert_eq!(format_roll_number(2031, 42), "3142");
        assert_eq!(format_roll_number(2100, 9), "0009");
    }

    #[test]
    fn test_first_free_roll_number() {
        let taken = ["2501", "2502", "2504"];
        let next = first_free_roll_number(2025, |r| taken.contains(&r));
        assert_eq!(next.as_deref(), Some("2503"));
    }

    #[test]
    fn test_roll_numbers_exhausted() {
        assert_eq!(first_free_roll_number(2025, |_| true), None);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(AdmissionStatus::UnderReview.to_string(), "Under Review");
        assert_eq!(
            "under review".parse::<AdmissionStatus>(),
            Ok(AdmissionStatus::UnderReview)
        );
        let json = serde_json::to_string(&AdmissionStatus::UnderReview).unwrap();
        assert_eq!(json, "\"Under Review\"");
        assert_eq!(generate_application_number(12), "APP12");
    }
}
