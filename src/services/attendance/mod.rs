//! 考勤服务
//!
//! 同一学生同一天只允许一条考勤；`mark` 从不覆盖已有记录，修改只能走 `PUT /{id}`。

pub mod mark;
pub mod query;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::attendance::requests::{
    AttendanceListQuery, AttendanceStatusQuery, BulkAttendanceRequest, MarkAttendanceRequest,
};
use crate::models::notifications::entities::{NotificationType, absence_message};
use crate::models::attendance::entities::AttendanceRecord;
use crate::storage::Storage;

super::lazy_storage_service!(AttendanceService);

pub(crate) const ALREADY_MARKED: &str = "Attendance already marked for this student on this date";

impl AttendanceService {
    pub async fn mark(
        &self,
        request: &HttpRequest,
        body: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::handle_mark(self, request, body).await
    }

    pub async fn mark_bulk(
        &self,
        request: &HttpRequest,
        body: BulkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::handle_mark_bulk(self, request, body).await
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        id: i64,
        body: MarkAttendanceRequest,
    ) -> ActixResult<HttpResponse> {
        mark::handle_update(self, request, id, body).await
    }

    pub async fn delete(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        mark::handle_delete(self, request, id).await
    }

    pub async fn submission_status(
        &self,
        request: &HttpRequest,
        query: AttendanceStatusQuery,
    ) -> ActixResult<HttpResponse> {
        query::handle_status(self, request, query).await
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        query: AttendanceListQuery,
    ) -> ActixResult<HttpResponse> {
        query::handle_list(self, request, query).await
    }

    pub async fn list_for_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        query::handle_list_for_student(self, request, student_id).await
    }
}

/// 缺勤时给学生账号发站内通知；失败只记日志
pub(crate) async fn notify_absence(
    storage: &Arc<dyn Storage>,
    record: &AttendanceRecord,
    notification_type: NotificationType,
) {
    let user_id = match storage.get_student_by_id(record.student_id).await {
        Ok(Some(student)) => student.user_id,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!("Absence notification skipped for {}: {}", record.student_id, e);
            return;
        }
    };

    match storage
        .create_notification(user_id, absence_message(record.date), notification_type)
        .await
    {
        Ok(_) => tracing::info!(
            "Absence notice ({}) sent to {} for {}",
            notification_type,
            record.student_name,
            record.date
        ),
        Err(e) => tracing::warn!(
            "Failed to notify {} about absence: {}",
            record.student_name,
            e
        ),
    }
}
