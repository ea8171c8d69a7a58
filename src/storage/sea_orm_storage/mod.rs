//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod admissions;
mod attendance;
mod enrollments;
mod fees;
mod notifications;
mod results;
mod students;
mod teachers;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, SchoolSyncError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// 数据库错误转换：唯一约束冲突保持为 Conflict，其余附加上下文
pub(crate) fn db_error(context: &str, err: DbErr) -> SchoolSyncError {
    match SchoolSyncError::from(err) {
        SchoolSyncError::DatabaseOperation(msg) => {
            SchoolSyncError::database_operation(format!("{context}: {msg}"))
        }
        other => other,
    }
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout_secs: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout_secs).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout_secs).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolSyncError::database_operation(format!("Migration failed: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolSyncError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        // 内存库每个连接都是独立的数据库，只能使用单连接且不能回收
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
            SqlitePoolOptions::new()
                .max_connections(pool_size.max(1))
                .min_connections(1)
                .idle_timeout(Duration::from_secs(300))
        };

        let pool = pool_options
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .connect_with(opt)
            .await
            .map_err(|e| {
                SchoolSyncError::database_connection(format!("SQLite connection failed: {e}"))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(
        url: &str,
        pool_size: u32,
        timeout_secs: u64,
    ) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(2)
            .connect_timeout(Duration::from_secs(timeout_secs))
            .acquire_timeout(Duration::from_secs(timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt).await.map_err(|e| {
            SchoolSyncError::database_connection(format!("Unable to connect to database: {e}"))
        })
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolSyncError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite://, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 学生模块
    async fn create_student(
        &self,
        user: CreateUserRequest,
        roll_no: String,
        class_name: String,
    ) -> Result<Student> {
        self.create_student_impl(user, roll_no, class_name).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn student_roll_exists(&self, roll_no: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.student_roll_exists_impl(roll_no, exclude_id).await
    }

    async fn student_phone_exists(&self, phone: &str, exclude_id: Option<i64>) -> Result<bool> {
        self.student_phone_exists_impl(phone, exclude_id).await
    }

    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        self.list_students_impl(query).await
    }

    async fn list_class_names(&self) -> Result<Vec<String>> {
        self.list_class_names_impl().await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 教师模块
    async fn create_teacher(
        &self,
        user: CreateUserRequest,
        subject: Option<String>,
        qualification: Option<String>,
    ) -> Result<Teacher> {
        self.create_teacher_impl(user, subject, qualification).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers(&self) -> Result<Vec<Teacher>> {
        self.list_teachers_impl().await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 考勤模块
    async fn create_attendance(
        &self,
        student_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<AttendanceRecord> {
        self.create_attendance_impl(student_id, date, status).await
    }

    async fn attendance_exists(&self, student_id: i64, date: NaiveDate) -> Result<bool> {
        self.attendance_exists_impl(student_id, date).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn list_attendance(&self, query: AttendanceListQuery) -> Result<Vec<AttendanceRecord>> {
        self.list_attendance_impl(query).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        student_id: i64,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Result<Option<AttendanceRecord>> {
        self.update_attendance_impl(id, student_id, date, status)
            .await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    // 成绩模块
    async fn create_result(
        &self,
        result: UploadResultRequest,
        uploaded_by: &str,
    ) -> Result<ResultRecord> {
        self.create_result_impl(result, uploaded_by).await
    }

    async fn result_exists(
        &self,
        student_id: i64,
        subject: &str,
        exam_type: &str,
        academic_year: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        self.result_exists_impl(student_id, subject, exam_type, academic_year, exclude_id)
            .await
    }

    async fn get_result_by_id(&self, id: i64) -> Result<Option<ResultRecord>> {
        self.get_result_by_id_impl(id).await
    }

    async fn list_results(&self, query: ResultListQuery) -> Result<Vec<ResultRecord>> {
        self.list_results_impl(query).await
    }

    async fn update_result(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ResultRecord>> {
        self.update_result_impl(id, update).await
    }

    async fn delete_result(&self, id: i64) -> Result<bool> {
        self.delete_result_impl(id).await
    }

    async fn count_results_uploaded_by(&self, username: &str) -> Result<u64> {
        self.count_results_uploaded_by_impl(username).await
    }

    // 费用模块
    async fn create_fee(&self, fee: CreateFeeRequest) -> Result<Fee> {
        self.create_fee_impl(fee).await
    }

    async fn get_fee_by_id(&self, id: i64) -> Result<Option<Fee>> {
        self.get_fee_by_id_impl(id).await
    }

    async fn list_fees(&self, query: FeeListQuery) -> Result<Vec<Fee>> {
        self.list_fees_impl(query).await
    }

    async fn update_fee(&self, id: i64, update: UpdateFeeRequest) -> Result<Option<Fee>> {
        self.update_fee_impl(id, update).await
    }

    async fn record_fee_payment(&self, id: i64, payment: FeePayment) -> Result<Option<Fee>> {
        self.record_fee_payment_impl(id, payment).await
    }

    async fn delete_fee(&self, id: i64) -> Result<bool> {
        self.delete_fee_impl(id).await
    }

    async fn mark_overdue_fees(&self, today: NaiveDate) -> Result<u64> {
        self.mark_overdue_fees_impl(today).await
    }

    // 学籍模块
    async fn create_enrollment(&self, enrollment: CreateEnrollmentRequest) -> Result<Enrollment> {
        self.create_enrollment_impl(enrollment).await
    }

    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_id_impl(id).await
    }

    async fn get_latest_enrollment(&self, student_id: i64) -> Result<Option<Enrollment>> {
        self.get_latest_enrollment_impl(student_id).await
    }

    async fn list_enrollments(&self, query: EnrollmentListQuery) -> Result<Vec<Enrollment>> {
        self.list_enrollments_impl(query).await
    }

    async fn update_enrollment(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_impl(id, update).await
    }

    async fn delete_enrollment(&self, id: i64) -> Result<bool> {
        self.delete_enrollment_impl(id).await
    }

    // 入学申请模块
    async fn create_admission(
        &self,
        application: ApplyAdmissionRequest,
        application_number: String,
    ) -> Result<Admission> {
        self.create_admission_impl(application, application_number)
            .await
    }

    async fn get_admission_by_id(&self, id: i64) -> Result<Option<Admission>> {
        self.get_admission_by_id_impl(id).await
    }

    async fn find_admission_by_contact(
        &self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<Admission>> {
        self.find_admission_by_contact_impl(email, phone).await
    }

    async fn list_admissions(&self, query: AdmissionListQuery) -> Result<Vec<Admission>> {
        self.list_admissions_impl(query).await
    }

    async fn update_admission_status(
        &self,
        id: i64,
        status: AdmissionStatus,
        remarks: Option<String>,
        roll_number: Option<String>,
    ) -> Result<Option<Admission>> {
        self.update_admission_status_impl(id, status, remarks, roll_number)
            .await
    }

    async fn delete_admission(&self, id: i64) -> Result<bool> {
        self.delete_admission_impl(id).await
    }

    // 通知模块
    async fn create_notification(
        &self,
        user_id: i64,
        message: String,
        notification_type: NotificationType,
    ) -> Result<Notification> {
        self.create_notification_impl(user_id, message, notification_type)
            .await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications(
        &self,
        user_id: i64,
        unread_only: bool,
    ) -> Result<Vec<Notification>> {
        self.list_notifications_impl(user_id, unread_only).await
    }

    async fn mark_notification_read(&self, id: i64) -> Result<Option<Notification>> {
        self.mark_notification_read_impl(id).await
    }

    async fn count_unread_notifications(&self, user_id: i64) -> Result<u64> {
        self.count_unread_notifications_impl(user_id).await
    }
}
