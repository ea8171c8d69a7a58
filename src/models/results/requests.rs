use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

// 上传单条成绩；未提供的字段使用默认值（满分 100、Mid-term、当前学年、今天）
#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct UploadResultRequest {
    pub student_id: i64,
    pub subject: String,
    pub marks: f64,
    pub max_marks: Option<f64>,
    pub exam_type: Option<String>,
    pub remarks: Option<String>,
    pub academic_year: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct BulkUploadResultRequest {
    pub results: Vec<UploadResultRequest>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct UpdateResultRequest {
    pub subject: Option<String>,
    pub marks: Option<f64>,
    pub max_marks: Option<f64>,
    pub exam_type: Option<String>,
    pub remarks: Option<String>,
    pub academic_year: Option<String>,
    pub date: Option<NaiveDate>,
}

// 成绩列表过滤条件；subject、examType 不区分大小写，日期区间包含两端
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListQuery {
    pub student_id: Option<i64>,
    pub class_name: Option<String>,
    pub subject: Option<String>,
    pub exam_type: Option<String>,
    pub academic_year: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct StatisticsQuery {
    pub subject: Option<String>,
    pub exam_type: Option<String>,
    pub academic_year: Option<String>,
}
