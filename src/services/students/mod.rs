pub mod create;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::{
    CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::access::{current_user, ensure_student_access};
use crate::services::{evict_cached_user, not_found, storage_error, try_or_respond};

super::lazy_storage_service!(StudentService);

impl StudentService {
    pub async fn list_students(
        &self,
        request: &HttpRequest,
        query: StudentListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_students(self, request, query).await
    }

    pub async fn list_class_students(
        &self,
        request: &HttpRequest,
        class_name: String,
    ) -> ActixResult<HttpResponse> {
        let query = StudentListQuery {
            class_name: Some(class_name),
            search: None,
        };
        list::list_students(self, request, query).await
    }

    pub async fn list_classes(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_classes(self, request).await
    }

    pub async fn get_student(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user = try_or_respond!(current_user(request));
        try_or_respond!(ensure_student_access(&storage, &user, id).await);

        match storage.get_student_by_id(id).await {
            Ok(Some(student)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student retrieved successfully",
            ))),
            Ok(None) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
            Err(e) => Ok(storage_error(
                ErrorCode::StudentNotFound,
                "Failed to load student",
                e,
            )),
        }
    }

    pub async fn create_student(
        &self,
        request: &HttpRequest,
        body: CreateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, request, body).await
    }

    pub async fn update_student(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateStudentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, request, id, body).await
    }

    pub async fn delete_student(
        &self,
        request: &HttpRequest,
        id: i64,
    ) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request)?;
        let user_id = match storage.get_student_by_id(id).await {
            Ok(Some(student)) => student.user_id,
            Ok(None) => return Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
            Err(e) => {
                return Ok(storage_error(
                    ErrorCode::InternalServerError,
                    "Failed to load student",
                    e,
                ));
            }
        };
        match storage.delete_student(id).await {
            Ok(true) => {
                evict_cached_user(request, user_id).await;
                tracing::info!("Deleted student {}", id);
                Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                    "Student deleted successfully",
                )))
            }
            Ok(false) => Ok(not_found(ErrorCode::StudentNotFound, "Student not found")),
            Err(e) => Ok(storage_error(
                ErrorCode::InternalServerError,
                "Failed to delete student",
                e,
            )),
        }
    }
}
