use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 考勤状态
    AttendanceStatus {
        Present => "Present",
        Absent => "Absent",
    }
}

// 考勤记录，附带学生信息便于前端展示
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceRecord {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub roll_no: String,
    pub class_name: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
