//! 学生与教师的综合档案

use serde::Serialize;
use ts_rs::TS;

use super::attendance::entities::{AttendanceRecord, AttendanceStatus};
use super::enrollments::entities::Enrollment;
use super::fees::entities::{Fee, FeeStatus};
use super::results::entities::{ResultRecord, round_to};
use super::students::entities::Student;
use super::teachers::entities::Teacher;

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct AttendanceSummary {
    pub present_days: usize,
    pub total_days: usize,
    /// 保留一位小数
    pub percentage: f64,
}

impl AttendanceSummary {
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let total_days = records.len();
        let present_days = records
            .iter()
            .filter(|r| r.status == AttendanceStatus::Present)
            .count();
        let percentage = if total_days == 0 {
            0.0
        } else {
            round_to(present_days as f64 * 100.0 / total_days as f64, 1)
        };
        Self {
            present_days,
            total_days,
            percentage,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct FeeSummary {
    pub total_records: usize,
    pub total_amount: f64,
    /// 未缴清（Pending 与 Overdue）的金额
    pub pending_amount: f64,
}

impl FeeSummary {
    pub fn from_fees(fees: &[Fee]) -> Self {
        Self {
            total_records: fees.len(),
            total_amount: fees.iter().map(|f| f.amount).sum(),
            pending_amount: fees
                .iter()
                .filter(|f| f.status != FeeStatus::Paid)
                .map(|f| f.amount)
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct ResultSummary {
    pub total_results: usize,
    /// 平均得分，保留一位小数
    pub average_marks: f64,
}

impl ResultSummary {
    pub fn from_results(results: &[ResultRecord]) -> Self {
        let total_results = results.len();
        let average_marks = if total_results == 0 {
            0.0
        } else {
            round_to(
                results.iter().map(|r| r.marks).sum::<f64>() / total_results as f64,
                1,
            )
        };
        Self {
            total_results,
            average_marks,
        }
    }
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct StudentProfile {
    pub student: Student,
    pub enrollment: Option<Enrollment>,
    pub attendance: AttendanceSummary,
    pub fees: FeeSummary,
    pub results: ResultSummary,
}

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct TeacherProfile {
    pub teacher: Teacher,
    pub results_uploaded: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fees::entities::FeeType;
    use chrono::NaiveDate;

    fn attendance(status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 0,
            student_id: 1,
            student_name: "s".into(),
            roll_no: "2501".into(),
            class_name: "10A".into(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            status,
        }
    }

    fn fee(amount: f64, status: FeeStatus) -> Fee {
        Fee {
            id: 0,
            student_id: 1,
            student_name: "s".into(),
            roll_no: "2501".into(),
            class_name: "10A".into(),
            fee_type: FeeType::Library,
            amount,
            due_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            paid_date: None,
            status,
            payment_method: None,
            transaction_id: None,
            receipt_number: None,
            remarks: None,
        }
    }

    #[test]
    fn test_attendance_summary() {
        let records = vec![
            attendance(AttendanceStatus::Present),
            attendance(AttendanceStatus::Present),
            attendance(AttendanceStatus::Absent),
        ];
        let summary = AttendanceSummary::from_records(&records);
        assert_eq!(summary.present_days, 2);
        assert_eq!(summary.total_days, 3);
        assert_eq!(summary.percentage, 66.7);
        assert_eq!(AttendanceSummary::from_records(&[]).percentage, 0.0);
    }

    #[test]
    fn test_fee_summary_counts_overdue_as_pending() {
        let fees = vec![
            fee(1000.0, FeeStatus::Paid),
            fee(250.0, FeeStatus::Pending),
            fee(300.0, FeeStatus::Overdue),
        ];
        let summary = FeeSummary::from_fees(&fees);
        assert_eq!(summary.total_amount, 1550.0);
        assert_eq!(summary.pending_amount, 550.0);
    }
}
