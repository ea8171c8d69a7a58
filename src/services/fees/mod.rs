//! 费用服务
//!
//! 列表查询前先执行逾期扫描；支付只在本地记账，网关下单与签名校验由前端组件完成。

pub mod manage;
pub mod payment;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::fees::{
    entities::Fee,
    requests::{CreateFeeRequest, FeeListQuery, PayFeeRequest, UpdateFeeRequest},
};
use crate::models::users::entities::User;
use crate::models::ErrorCode;
use crate::services::access::ensure_admin_or_owning_student;
use crate::services::{not_found, storage_error};
use crate::storage::Storage;
use crate::utils::today;

super::lazy_storage_service!(FeeService);

impl FeeService {
    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn create(
        &self,
        request: &HttpRequest,
        body: CreateFeeRequest,
    ) -> ActixResult<HttpResponse> {
        manage::handle_create(self, request, body).await
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        query: FeeListQuery,
    ) -> ActixResult<HttpResponse> {
        manage::handle_list(self, request, query).await
    }

    pub async fn list_for_student(
        &self,
        request: &HttpRequest,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        manage::handle_list_for_student(self, request, student_id).await
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        id: i64,
        body: UpdateFeeRequest,
    ) -> ActixResult<HttpResponse> {
        manage::handle_update(self, request, id, body).await
    }

    pub async fn delete(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        manage::handle_delete(self, request, id).await
    }

    pub async fn checkout(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        payment::handle_checkout(self, request, id).await
    }

    pub async fn pay(
        &self,
        request: &HttpRequest,
        id: i64,
        body: PayFeeRequest,
    ) -> ActixResult<HttpResponse> {
        payment::handle_pay(self, request, id, body).await
    }

    pub async fn receipt(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        payment::handle_receipt(self, request, id).await
    }
}

/// 把到期未缴的费用标记为逾期；失败只记日志，不影响查询
pub(crate) async fn sweep_overdue(storage: &Arc<dyn Storage>) {
    match storage.mark_overdue_fees(today()).await {
        Ok(0) => {}
        Ok(count) => tracing::info!("Marked {} fee(s) as overdue", count),
        Err(e) => tracing::warn!("Overdue sweep failed: {}", e),
    }
}

/// 加载费用并校验访问权限（管理员或所属学生）
pub(crate) async fn load_accessible_fee(
    storage: &Arc<dyn Storage>,
    user: &User,
    id: i64,
) -> Result<Fee, HttpResponse> {
    let fee = match storage.get_fee_by_id(id).await {
        Ok(Some(fee)) => fee,
        Ok(None) => return Err(not_found(ErrorCode::FeeNotFound, "Fee record not found")),
        Err(e) => {
            return Err(storage_error(
                ErrorCode::FeeNotFound,
                "Failed to load fee",
                e,
            ));
        }
    };
    ensure_admin_or_owning_student(storage, user, fee.student_id).await?;
    Ok(fee)
}
