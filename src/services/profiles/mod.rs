//! 综合档案：聚合学籍、考勤、费用与成绩

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::attendance::requests::AttendanceListQuery;
use crate::models::fees::requests::FeeListQuery;
use crate::models::profiles::{
    AttendanceSummary, FeeSummary, ResultSummary, StudentProfile, TeacherProfile,
};
use crate::models::results::requests::ResultListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, ensure_student_access};
use crate::services::fees::sweep_overdue;
use crate::services::{forbidden, not_found, storage_error, try_or_respond};

super::lazy_storage_service!(ProfileService);

impl ProfileService {
    pub async fn student_profile(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = try_or_respond!(current_user(request));
        try_or_respond!(ensure_student_access(&storage, &user, student_id).await);

        let student = match storage.get_student_by_id(student_id).await {
            Ok(Some(student)) => student,
            Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::StudentNotFound,
                    "Failed to load student",
                    e,
                ));
            }
        };

        sweep_overdue(&storage).await;

        let loaded = async {
            let enrollment = storage.get_latest_enrollment(student_id).await?;
            let attendance = storage
                .list_attendance(AttendanceListQuery {
                    student_id: Some(student_id),
                    ..Default::default()
                })
                .await?;
            let fees = storage
                .list_fees(FeeListQuery {
                    student_id: Some(student_id),
                    status: None,
                })
                .await?;
            let results = storage
                .list_results(ResultListQuery {
                    student_id: Some(student_id),
                    ..Default::default()
                })
                .await?;
            Ok::<_, crate::errors::SchoolSyncError>((enrollment, attendance, fees, results))
        }
        .await;

        let (enrollment, attendance, fees, results) = match loaded {
            Ok(parts) => parts,
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::InternalServerError,
                    "Failed to build profile",
                    e,
                ));
            }
        };

        let profile = StudentProfile {
            student,
            enrollment,
            attendance: AttendanceSummary::from_records(&attendance),
            fees: FeeSummary::from_fees(&fees),
            results: ResultSummary::from_results(&results),
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            profile,
            "Student profile retrieved successfully",
        )))
    }

    pub async fn teacher_profile(
        &self,
        request: &HttpRequest,
        teacher_id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = try_or_respond!(current_user(request));

        let teacher = match storage.get_teacher_by_id(teacher_id).await {
            Ok(Some(teacher)) => teacher,
            Ok(None) => return Ok(not_found(ErrorCode::TeacherNotFound, "Teacher not found")),
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::TeacherNotFound,
                    "Failed to load teacher",
                    e,
                ));
            }
        };

        if user.role != UserRole::Admin && teacher.user_id != user.id {
            return Ok(forbidden("You can only access your own profile"));
        }

        let results_uploaded = match storage.count_results_uploaded_by(&teacher.username).await {
            Ok(count) => count,
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::InternalServerError,
                    "Failed to build profile",
                    e,
                ));
            }
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherProfile {
                teacher,
                results_uploaded,
            },
            "Teacher profile retrieved successfully",
        )))
    }
}
