pub mod query;
pub mod upload;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::results::requests::{
    BulkUploadResultRequest, ResultListQuery, StatisticsQuery, UpdateResultRequest,
    UploadResultRequest,
};

super::lazy_storage_service!(ResultService);

pub(crate) const ALREADY_EXISTS: &str =
    "Result already exists for this student, subject, exam type and academic year";

impl ResultService {
    pub async fn upload(
        &self,
        request: &HttpRequest,
        body: UploadResultRequest,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, body).await
    }

    pub async fn upload_bulk(
        &self,
        request: &HttpRequest,
        body: BulkUploadResultRequest,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload_bulk(self, request, body).await
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateResultRequest,
    ) -> ActixResult<HttpResponse> {
        upload::handle_update(self, request, id, body).await
    }

    pub async fn delete(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        upload::handle_delete(self, request, id).await
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        query: ResultListQuery,
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

    pub async fn list_for_class(
        &self,
        request: &HttpRequest,
        class_name: String,
    ) -> ActixResult<HttpResponse> {
        let query = ResultListQuery {
            class_name: Some(class_name),
            ..Default::default()
        };
        query::handle_list(self, request, query).await
    }

    pub async fn statistics(
        &self,
        request: &HttpRequest,
        class_name: String,
        query: StatisticsQuery,
    ) -> ActixResult<HttpResponse> {
        query::handle_statistics(self, request, class_name, query).await
    }
}
