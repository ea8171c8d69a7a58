use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生实体（含登录账号信息）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub roll_no: String,
    pub class_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 列表、考勤表等场景使用的学生摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentSummary {
    pub id: i64,
    pub username: String,
    pub roll_no: String,
    pub class_name: String,
}

impl From<&Student> for StudentSummary {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            username: student.username.clone(),
            roll_no: student.roll_no.clone(),
            class_name: student.class_name.clone(),
        }
    }
}
