use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师实体（含登录账号信息）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub subject: Option<String>,
    pub qualification: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
