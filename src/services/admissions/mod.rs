//! 入学申请
//!
//! 提交与状态查询为公开接口，其余操作仅限管理员。批准时分配一次学号。

pub mod apply;
pub mod review;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::admissions::requests::{
    AdmissionListQuery, ApplyAdmissionRequest, CheckAdmissionStatusQuery,
    UpdateAdmissionStatusRequest,
};

super::lazy_storage_service!(AdmissionService);

impl AdmissionService {
    pub async fn apply(
        &self,
        request: &HttpRequest,
        body: ApplyAdmissionRequest,
    ) -> ActixResult<HttpResponse> {
        apply::handle_apply(self, request, body).await
    }

    pub async fn check_status(
        &self,
        request: &HttpRequest,
        query: CheckAdmissionStatusQuery,
    ) -> ActixResult<HttpResponse> {
        apply::handle_check_status(self, request, query).await
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        query: AdmissionListQuery,
    ) -> ActixResult<HttpResponse> {
        review::handle_list(self, request, query).await
    }

    pub async fn get(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        review::handle_get(self, request, id).await
    }

    pub async fn update_status(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateAdmissionStatusRequest,
    ) -> ActixResult<HttpResponse> {
        review::handle_update_status(self, request, id, body).await
    }

    pub async fn delete(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        review::handle_delete(self, request, id).await
    }
}
