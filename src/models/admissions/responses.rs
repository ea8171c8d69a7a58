use serde::Serialize;
use ts_rs::TS;

use super::entities::{Admission, AdmissionStatus};

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admission.ts")]
pub struct ApplyAdmissionResponse {
    pub id: i64,
    pub application_number: String,
    pub status: AdmissionStatus,
}

// 公开状态查询结果，不包含家庭信息
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/admission.ts")]
pub struct AdmissionStatusResponse {
    pub application_number: String,
    pub full_name: String,
    pub applied_class: String,
    pub application_date: chrono::DateTime<chrono::Utc>,
    pub status: AdmissionStatus,
    pub remarks: Option<String>,
    pub roll_number: Option<String>,
}

impl From<Admission> for AdmissionStatusResponse {
    fn from(admission: Admission) -> Self {
        Self {
            application_number: admission.application_number,
            full_name: admission.full_name,
            applied_class: admission.applied_class,
            application_date: admission.application_date,
            status: admission.status,
            remarks: admission.remarks,
            roll_number: admission.roll_number,
        }
    }
}
