use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest,
};
use crate::models::{ApiResponse, ErrorCode, ListResponse};
use crate::services::{bad_request, not_found, storage_error};
use crate::utils::non_empty;

super::lazy_storage_service!(EnrollmentService);

impl EnrollmentService {
    pub async fn create(
        &self,
        request: &HttpRequest,
        body: CreateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;

        let (Some(academic_year), Some(class_name), Some(section)) = (
            non_empty(Some(body.academic_year)),
            non_empty(Some(body.class_name)),
            non_empty(Some(body.section)),
        ) else {
            return Ok(bad_request(
                ErrorCode::BadRequest,
                "Academic year, class and section are required",
            ));
        };

        match storage.get_student_by_id(body.student_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::StudentNotFound,
                    "Failed to load student",
                    e,
                ));
            }
        }

        let body = CreateEnrollmentRequest {
            academic_year,
            class_name,
            section,
            remarks: non_empty(body.remarks),
            ..body
        };

        match storage.create_enrollment(body).await {
            Ok(enrollment) => Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Enrollment created successfully",
            ))),
            Err(e) => Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to create enrollment",
                e,
            )),
        }
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        query: EnrollmentListQuery,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match storage.list_enrollments(query).await {
            Ok(enrollments) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                ListResponse::new(enrollments),
                "Enrollments retrieved successfully",
            ))),
            Err(e) => Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to list enrollments",
                e,
            )),
        }
    }

    pub async fn get(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match storage.get_enrollment_by_id(id).await {
            Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                "Enrollment retrieved successfully",
            ))),
            Ok(None) => Ok(not_found(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            )),
            Err(e) => Ok(storage_error(
                ErrorCode::EnrollmentNotFound,
                "Failed to load enrollment",
                e,
            )),
        }
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateEnrollmentRequest,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let update = UpdateEnrollmentRequest {
            academic_year: non_empty(body.academic_year),
            class_name: non_empty(body.class_name),
            section: non_empty(body.section),
            ..body
        };

        match storage.update_enrollment(id, update).await {
            Ok(Some(enrollment)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                "Enrollment updated successfully",
            ))),
            Ok(None) => Ok(not_found(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            )),
            Err(e) => Ok(storage_error(
                ErrorCode::EnrollmentNotFound,
                "Failed to update enrollment",
                e,
            )),
        }
    }

    pub async fn delete(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        match storage.delete_enrollment(id).await {
            Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Enrollment deleted successfully",
            ))),
            Ok(false) => Ok(not_found(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            )),
            Err(e) => Ok(storage_error(
                ErrorCode::EnrollmentNotFound,
                "Failed to delete enrollment",
                e,
            )),
        }
    }
}
