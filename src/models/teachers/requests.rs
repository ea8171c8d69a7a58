use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub subject: Option<String>,
    pub qualification: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub qualification: Option<String>,
    pub password: Option<String>,
}
