use chrono::NaiveDate;
use serde::Serialize;
use ts_rs::TS;

// 整班提交结果
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct BulkAttendanceResponse {
    pub date: NaiveDate,
    pub total_records: usize,
    pub success_count: usize,
    pub fail_count: usize,
    pub absent_students: Vec<String>,
    pub failures: Vec<String>,
}

/// 某日考勤提交状态
///
/// 只有视图内至少有一名学生且每名学生都已登记时才算已提交。
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/attendance.ts")]
pub struct AttendanceSubmissionStatus {
    pub date: NaiveDate,
    pub class_name: Option<String>,
    pub total_students: usize,
    pub marked_count: usize,
    pub submitted: bool,
}

impl AttendanceSubmissionStatus {
    pub fn new(
        date: NaiveDate,
        class_name: Option<String>,
        total_students: usize,
        marked_count: usize,
    ) -> Self {
        Self {
            date,
            class_name,
            total_students,
            marked_count,
            submitted: is_sheet_submitted(total_students, marked_count),
        }
    }
}

pub fn is_sheet_submitted(total_students: usize, marked_count: usize) -> bool {
    marked_count > 0 && marked_count == total_students
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitted_guard() {
        assert!(!is_sheet_submitted(0, 0));
        assert!(!is_sheet_submitted(30, 0));
        assert!(!is_sheet_submitted(30, 29));
        assert!(is_sheet_submitted(30, 30));
    }

    #[test]
    fn test_status_builder() {
        let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let status = AttendanceSubmissionStatus::new(date, Some("10A".into()), 2, 2);
        assert!(status.submitted);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["markedCount"], 2);
        assert_eq!(json["date"], "2025-07-01");
    }
}
