use serde::Serialize;
use std::collections::BTreeMap;
use ts_rs::TS;

use super::entities::{Grade, ResultRecord, is_pass, percentage, round_to};

#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct BulkUploadResultResponse {
    pub total_records: usize,
    pub success_count: usize,
    pub fail_count: usize,
    pub errors: Vec<String>,
}

// 班级成绩统计
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ClassStatistics {
    pub class_name: String,
    pub total_results: usize,
    pub average_percentage: f64,
    pub highest_marks: f64,
    pub lowest_marks: f64,
    pub pass_count: usize,
    pub fail_count: usize,
    pub grade_distribution: BTreeMap<String, usize>,
}

impl ClassStatistics {
    /// 汇总成绩；没有成绩时各项为 0，分布为空
    pub fn compute(class_name: &str, results: &[ResultRecord]) -> Self {
        if results.is_empty() {
            return Self {
                class_name: class_name.to_string(),
                total_results: 0,
                average_percentage: 0.0,
                highest_marks: 0.0,
                lowest_marks: 0.0,
                pass_count: 0,
                fail_count: 0,
                grade_distribution: BTreeMap::new(),
            };
        }

        let total = results.len();
        let percentage_sum: f64 = results
            .iter()
            .map(|r| percentage(r.marks, r.max_marks))
            .sum();
        let highest = results.iter().map(|r| r.marks).fold(f64::MIN, f64::max);
        let lowest = results.iter().map(|r| r.marks).fold(f64::MAX, f64::min);
        let pass_count = results
            .iter()
            .filter(|r| is_pass(r.marks, r.max_marks))
            .count();

        let mut grade_distribution = BTreeMap::new();
        for result in results {
            let grade = Grade::from_marks(result.marks, result.max_marks);
            *grade_distribution
                .entry(grade.as_str().to_string())
                .or_insert(0) += 1;
        }

        Self {
            class_name: class_name.to_string(),
            total_results: total,
            average_percentage: round_to(percentage_sum / total as f64, 2),
            highest_marks: highest,
            lowest_marks: lowest,
            pass_count,
            fail_count: total - pass_count,
            grade_distribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(marks: f64, max_marks: f64) -> ResultRecord {
        ResultRecord {
            id: 0,
            student_id: 1,
            student_name: "s".into(),
            roll_no: "2501".into(),
            class_name: "10A".into(),
            subject: "Maths".into(),
            marks,
            max_marks,
            percentage: percentage(marks, max_marks),
            grade: Grade::from_marks(marks, max_marks),
            exam_type: "Mid-term".into(),
            remarks: None,
            academic_year: "2025-26".into(),
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            uploaded_by: "teacher".into(),
        }
    }

    #[test]
    fn test_statistics_empty() {
        let stats = ClassStatistics::compute("10A", &[]);
        assert_eq!(stats.class_name, "10A");
        assert_eq!(stats.total_results, 0);
        assert_eq!(stats.average_percentage, 0.0);
        assert_eq!(stats.highest_marks, 0.0);
        assert_eq!(stats.lowest_marks, 0.0);
        assert_eq!(stats.pass_count + stats.fail_count, 0);
        assert!(stats.grade_distribution.is_empty());
    }

    #[test]
    fn test_statistics_summary() {
        let results = vec![record(95.0, 100.0), record(40.0, 100.0), record(10.0, 50.0)];
        let stats = ClassStatistics::compute("10A", &results);
        assert_eq!(stats.total_results, 3);
        // (95 + 40 + 20) / 3
        assert_eq!(stats.average_percentage, 51.67);
        assert_eq!(stats.highest_marks, 95.0);
        assert_eq!(stats.lowest_marks, 10.0);
        assert_eq!(stats.pass_count, 2);
        assert_eq!(stats.fail_count, 1);
        assert_eq!(stats.grade_distribution.get("A+"), Some(&1));
        assert_eq!(stats.grade_distribution.get("C"), Some(&1));
        assert_eq!(stats.grade_distribution.get("F"), Some(&1));
    }
}
