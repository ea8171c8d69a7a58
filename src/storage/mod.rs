use chrono::NaiveDate;

use crate::models::{
    admissions::{
        entities::{Admission, AdmissionStatus},
        requests::{AdmissionListQuery, ApplyAdmissionRequest},
    },
    attendance::{
        entities::{AttendanceRecord, AttendanceStatus},
        requests::AttendanceListQuery,
    },
    enrollments::{
        entities::Enrollment,
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
    },
    fees::{
        entities::Fee,
        requests::{CreateFeeRequest, FeeListQuery, FeePayment, UpdateFeeRequest},
    },
    notifications::entities::{Notification, NotificationType},
    results::{
        entities::ResultRecord,
        requests::{ResultListQuery, UpdateResultRequest, UploadResultRequest},
    },
    students::{
        entities::Student,
        requests::{StudentListQuery, UpdateStudentRequest},
    },
    teachers::{entities::Teacher, requests::UpdateTeacherRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段已是哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 学生管理方法
    // 同一事务内创建用户与学生档案
    async fn create_student(
        &self,
        user: CreateUserRequest,
        roll_no: String,
        class_name: String,
    ) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    // 学号是否已被其他学生占用
    async fn student_roll_exists(&self, roll_no: &str, exclude_id: Option<i64>) -> Result<bool>;
    // 手机号是否已被其他学生占用
    async fn student_phone_exists(&self, phone: &str, exclude_id: Option<i64>) -> Result<bool>;
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>>;
    // 去重后的班级名（升序）
    async fn list_class_names(&self) -> Result<Vec<String>>;
    // password 字段若存在则已是哈希
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 删除学生（连同用户）
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 教师管理方法
    async fn create_teacher(
        &self,
        user: CreateUserRequest,
        subject: Option<String>,
        qualification: Option<String>,
    ) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers(&self) -> Result<Vec<Teacher>>;
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 考勤管理方法
    async fn create_attendance(
        &self,
        student_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord>;
    // 某学生某天是否已有考勤
    async fn attendance_exists(&self, student_id: i64, date: NaiveDate) -> Result<bool>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>>;
    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>>;
    async fn update_attendance(
        &self,
        id: i64,
        student_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;

    /// 成绩管理方法
    async fn create_result(
        &self,
        result: UploadResultRequest,
        uploaded_by: &str,
    ) -> Result<ResultRecord>;
    // (学生, 科目, 考试类型, 学年) 是否已有成绩
    async fn result_exists(
        &self,
        student_id: i64,
        subject: &str,
        exam_type: &str,
        academic_year: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool>;
    async fn get_result_by_id(&self, id: i64) -> Result<Option<ResultRecord>>;
    async fn list_results(&self, query: ResultListQuery) -> Result<Vec<ResultRecord>>;
    async fn update_result(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ResultRecord>>;
    async fn delete_result(&self, id: i64) -> Result<bool>;
    async fn count_results_uploaded_by(&self, username: &str) -> Result<u64>;

    /// 费用管理方法
    async fn create_fee(&self, fee: CreateFeeRequest) -> Result<Fee>;
    async fn get_fee_by_id(&self, id: i64) -> Result<Option<Fee>>;
    async fn list_fees(&self, query: FeeListQuery) -> Result<Vec<Fee>>;
    async fn update_fee(&self, id: i64, update: UpdateFeeRequest) -> Result<Option<Fee>>;
    async fn record_fee_payment(&self, id: i64, payment: FeePayment) -> Result<Option<Fee>>;
    async fn delete_fee(&self, id: i64) -> Result<bool>;
    // 到期未缴的费用标记为 Overdue，返回受影响行数
    async fn mark_overdue_fees(&self, today: NaiveDate) -> Result<u64>;

    /// 学籍管理方法
    async fn create_enrollment(&self, enrollment: CreateEnrollmentRequest) -> Result<Enrollment>;
    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>>;
    async fn get_latest_enrollment(&self, student_id: i64) -> Result<Option<Enrollment>>;
    async fn list_enrollments(&self, query: EnrollmentListQuery) -> Result<Vec<Enrollment>>;
    async fn update_enrollment(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, id: i64) -> Result<bool>;

    /// 入学申请方法
    async fn create_admission(
        &self,
        application: ApplyAdmissionRequest,
        application_number: String,
    ) -> Result<Admission>;
    async fn get_admission_by_id(&self, id: i64) -> Result<Option<Admission>>;
    // 按邮箱或手机号查找最近一次申请
    async fn find_admission_by_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Admission>>;
    async fn list_admissions(&self, query: AdmissionListQuery) -> Result<Vec<Admission>>;
    async fn update_admission_status(
        &self,
        id: i64,
        status: AdmissionStatus,
        remarks: Option<String>,
        roll_number: Option<String>,
    ) -> Result<Option<Admission>>;
    async fn delete_admission(&self, id: i64) -> Result<bool>;

    /// 通知方法
    async fn create_notification(
        &self,
        user_id: i64,
        message: String,
        notification_type: NotificationType,
    ) -> Result<Notification>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    // 按创建时间倒序
    async fn list_notifications(&self, user_id: i64, unread_only: bool)
    -> Result<Vec<Notification>>;
    async fn mark_notification_read(&self, id: i64) -> Result<Option<Notification>>;
    async fn count_unread_notifications(&self, user_id: i64) -> Result<u64>;
}
