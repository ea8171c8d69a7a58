use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::UserRole;

// 用户登录请求，username 字段也接受邮箱
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
}

// 自助注册：学生需提供学号与班级，教师可提供科目与学历
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub roll_no: Option<String>,
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub qualification: Option<String>,
}
