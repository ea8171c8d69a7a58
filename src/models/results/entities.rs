use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 及格线（百分比）
pub const PASS_PERCENTAGE: f64 = 33.0;
pub const DEFAULT_MAX_MARKS: f64 = 100.0;
pub const DEFAULT_EXAM_TYPE: &str = "Mid-term";

crate::define_string_enum! {
    /// 等级，由得分百分比换算
    Grade {
        APlus => "A+",
        A => "A",
        BPlus => "B+",
        B => "B",
        CPlus => "C+",
        C => "C",
        D => "D",
        F => "F",
    }
}

impl Grade {
    /// 按百分比换算等级：≥90 A+，≥80 A，≥70 B+，≥60 B，≥50 C+，≥40 C，≥33 D，否则 F
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => Grade::APlus,
            p if p >= 80.0 => Grade::A,
            p if p >= 70.0 => Grade::BPlus,
            p if p >= 60.0 => Grade::B,
            p if p >= 50.0 => Grade::CPlus,
            p if p >= 40.0 => Grade::C,
            p if p >= PASS_PERCENTAGE => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn from_marks(marks: f64, max_marks: f64) -> Self {
        Self::from_percentage(percentage(marks, max_marks))
    }
}

pub fn percentage(marks: f64, max_marks: f64) -> f64 {
    if max_marks <= 0.0 {
        return 0.0;
    }
    marks / max_marks * 100.0
}

pub fn is_pass(marks: f64, max_marks: f64) -> bool {
    percentage(marks, max_marks) >= PASS_PERCENTAGE
}

/// 校验分数范围：满分为正，得分在 [0, 满分] 内
pub fn validate_marks(marks: f64, max_marks: f64) -> Result<(), String> {
    if !marks.is_finite() || !max_marks.is_finite() {
        return Err("Marks must be valid numbers".to_string());
    }
    if max_marks <= 0.0 {
        return Err("Max marks must be greater than 0".to_string());
    }
    if marks < 0.0 || marks > max_marks {
        return Err(format!("Marks must be between 0 and {max_marks}"));
    }
    Ok(())
}

/// 学年，四月开学：2025-04-01 起为 "2025-26"
pub fn academic_year_for(date: NaiveDate) -> String {
    use chrono::Datelike;
    let start = if date.month() >= 4 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1) % 100)
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// 成绩记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultRecord {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub roll_no: String,
    pub class_name: String,
    pub subject: String,
    pub marks: f64,
    pub max_marks: f64,
    pub percentage: f64,
    pub grade: Grade,
    pub exam_type: String,
    pub remarks: Option<String>,
    pub academic_year: String,
    pub date: NaiveDate,
    pub uploaded_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_boundaries() {
        assert_eq!(Grade::from_percentage(100.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(90.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(89.99), Grade::A);
        assert_eq!(Grade::from_percentage(80.0), Grade::A);
        assert_eq!(Grade::from_percentage(70.0), Grade::BPlus);
        assert_eq!(Grade::from_percentage(60.0), Grade::B);
        assert_eq!(Grade::from_percentage(50.0), Grade::CPlus);
        assert_eq!(Grade::from_percentage(40.0), Grade::C);
        assert_eq!(Grade::from_percentage(39.9), Grade::D);
        assert_eq!(Grade::from_percentage(33.0), Grade::D);
        assert_eq!(Grade::from_percentage(32.9), Grade::F);
        assert_eq!(Grade::from_percentage(0.0), Grade::F);
    }

    #[test]
    fn test_grade_from_marks_uses_max_marks() {
        assert_eq!(Grade::from_marks(45.0, 50.0), Grade::APlus);
        assert_eq!(Grade::from_marks(20.0, 50.0), Grade::C);
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!("b+".parse::<Grade>(), Ok(Grade::BPlus));
    }

    #[test]
    fn test_validate_marks() {
        assert!(validate_marks(0.0, 100.0).is_ok());
        assert!(validate_marks(100.0, 100.0).is_ok());
        assert!(validate_marks(101.0, 100.0).is_err());
        assert!(validate_marks(-1.0, 100.0).is_err());
        assert!(validate_marks(10.0, 0.0).is_err());
    }

    #[test]
    fn test_academic_year() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        assert_eq!(academic_year_for(d(2025, 4, 1)), "2025-26");
        assert_eq!(academic_year_for(d(2026, 3, 31)), "2025-26");
        assert_eq!(academic_year_for(d(2099, 12, 1)), "2099-00");
    }

    #[test]
    fn test_pass_mark() {
        assert!(is_pass(33.0, 100.0));
        assert!(!is_pass(32.0, 100.0));
        assert_eq!(round_to(66.666, 2), 66.67);
    }
}
