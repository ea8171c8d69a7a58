pub mod extractor;
pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use extractor::{SafeClassName, SafeIDI64, SafeStudentIdI64, SafeUserIdI64};
pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;

/// 当前毫秒时间戳，用于生成申请号、流水号
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// 今天（UTC 日期）
pub fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// 去除首尾空白，空串视为 None
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
