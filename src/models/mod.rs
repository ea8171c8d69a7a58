//! 数据模型
//!
//! 每个业务模块分为 entities（业务实体）、requests（请求体/查询参数）、responses（响应体）。
//! 所有对外类型同时导出 TypeScript 定义供前端使用。

pub mod admissions;
pub mod attendance;
pub mod auth;
pub mod common;
pub mod enrollments;
pub mod fees;
pub mod notifications;
pub mod profiles;
pub mod results;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, ListResponse};

/// 业务错误码，随响应体 `code` 字段返回
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 5000,

    // 认证与用户
    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserPhoneInvalid = 2005,
    UserNameAlreadyExists = 2006,
    UserEmailAlreadyExists = 2007,
    UserNotFound = 2008,

    // 学生与教师
    StudentNotFound = 3000,
    RollNumberAlreadyExists = 3001,
    StudentPhoneAlreadyExists = 3002,
    TeacherNotFound = 3100,

    // 考勤
    AttendanceNotFound = 4000,
    AttendanceAlreadyMarked = 4001,

    // 成绩
    ResultNotFound = 4100,
    ResultAlreadyExists = 4101,
    ResultMarksInvalid = 4102,

    // 费用
    FeeNotFound = 4200,
    FeeAlreadyPaid = 4201,
    FeeNotPaid = 4202,
    PaymentNotConfigured = 4203,

    // 学籍
    EnrollmentNotFound = 4300,

    // 入学申请
    AdmissionNotFound = 4400,
    AdmissionInvalid = 4401,
    RollNumberExhausted = 4402,

    // 通知
    NotificationNotFound = 4500,
}

/// 进程启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
