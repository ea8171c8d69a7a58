use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::AdmissionStatus;
use crate::utils::validate::{
    validate_academic_year_range, validate_address, validate_admission_phone, validate_email,
    validate_gender, validate_person_name, validate_pincode,
};

/// 申请人最小年龄
pub const MIN_APPLICANT_AGE: i32 = 5;

// 提交入学申请（公开接口）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admission.ts")]
pub struct ApplyAdmissionRequest {
    pub first_name: String,
    pub last_name: String,
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
}

impl ApplyAdmissionRequest {
    /// 校验申请内容，返回全部错误
    pub fn validate(&self, today: NaiveDate) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let mut check = |result: Result<(), String>| {
            if let Err(msg) = result {
                errors.push(msg);
            }
        };

        check(validate_person_name("First name", &self.first_name));
        check(validate_person_name("Last name", &self.last_name));
        check(validate_gender(&self.gender));
        check(validate_email(&self.email).map_err(str::to_string));
        check(validate_admission_phone("Phone", &self.phone));
        check(validate_address(&self.address));
        check(validate_person_name("City", &self.city));
        check(validate_person_name("State", &self.state));
        check(validate_pincode(&self.pincode));
        check(validate_academic_year_range(&self.academic_year));
        check(validate_person_name("Father name", &self.father_name));
        check(validate_person_name("Mother name", &self.mother_name));

        if self.applied_class.trim().is_empty() {
            check(Err("Applied class is required".to_string()));
        }

        for (label, phone) in [
            ("Father phone", &self.father_phone),
            ("Mother phone", &self.mother_phone),
            ("Guardian phone", &self.guardian_phone),
        ] {
            if let Some(phone) = phone.as_deref().filter(|p| !p.trim().is_empty()) {
                check(validate_admission_phone(label, phone));
            }
        }

        if let Some(marks) = self.previous_marks
            && !(0.0..=100.0).contains(&marks)
        {
            check(Err("Previous marks must be between 0 and 100".to_string()));
        }

        if age_on(self.date_of_birth, today) < MIN_APPLICANT_AGE {
            check(Err(format!(
                "Applicant must be at least {MIN_APPLICANT_AGE} years old"
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// 计算周岁
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

// 管理员更新申请状态
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admission.ts")]
pub struct UpdateAdmissionStatusRequest {
    pub status: AdmissionStatus,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admission.ts")]
pub struct AdmissionListQuery {
    pub status: Option<AdmissionStatus>,
}

// 公开查询申请状态，至少提供一项
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admission.ts")]
pub struct CheckAdmissionStatusQuery {
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ApplyAdmissionRequest {
        ApplyAdmissionRequest {
            first_name: "Asha".into(),
            last_name: "Verma".into(),
            date_of_birth: NaiveDate::from_ymd_opt(2015, 5, 10).unwrap(),
            gender: "Female".into(),
            email: "asha.parent@example.com".into(),
            phone: "9876543210".into(),
            address: "12 MG Road, Near City Park".into(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            pincode: "411001".into(),
            applied_class: "5".into(),
            academic_year: "2025-2026".into(),
            father_name: "Rakesh Verma".into(),
            father_occupation: Some("Engineer".into()),
            father_phone: Some("9123456780".into()),
            mother_name: "Sunita Verma".into(),
            mother_occupation: None,
            mother_phone: None,
            guardian_name: None,
            guardian_relation: None,
            guardian_phone: None,
            previous_school: None,
            previous_class: None,
            previous_marks: Some(88.0),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_valid_application() {
        assert!(valid_request().validate(today()).is_ok());
    }

    #[test]
    fn test_invalid_fields_are_all_reported() {
        let mut req = valid_request();
        req.pincode = "41100".into();
        req.phone = "5876543210".into();
        req.first_name = "Asha1".into();
        req.previous_marks = Some(101.0);
        let errors = req.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_applicant_too_young() {
        let mut req = valid_request();
        req.date_of_birth = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert!(req.validate(today()).is_err());
    }

    #[test]
    fn test_age_on_birthday_boundary() {
        let dob = NaiveDate::from_ymd_opt(2020, 6, 2).unwrap();
        assert_eq!(age_on(dob, today()), 4);
        assert_eq!(age_on(dob, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()), 5);
    }
}
