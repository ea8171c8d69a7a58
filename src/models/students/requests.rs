use serde::Deserialize;
use ts_rs::TS;

// 管理员创建学生（同时创建登录账号）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub roll_no: String,
    pub class_name: String,
    pub phone: Option<String>,
}

// 学生更新请求，字段均可选
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub roll_no: Option<String>,
    pub class_name: Option<String>,
    pub password: Option<String>,
}

// 学生列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    pub class_name: Option<String>,
    pub search: Option<String>,
}
