use chrono::NaiveDate;
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{FeeStatus, FeeType};

#[derive(Debug, Clone, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CreateFeeRequest {
    pub student_id: i64,
    pub fee_type: FeeType,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: Option<FeeStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct UpdateFeeRequest {
    pub fee_type: Option<FeeType>,
    pub amount: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<FeeStatus>,
    pub remarks: Option<String>,
}

// 支付回填：网关返回的流水号可选，未提供时由服务端生成
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct PayFeeRequest {
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct FeeListQuery {
    pub student_id: Option<i64>,
    pub status: Option<FeeStatus>,
}

/// 存储层记录支付所需数据
#[derive(Debug, Clone)]
pub struct FeePayment {
    pub paid_date: NaiveDate,
    pub payment_method: String,
    pub transaction_id: String,
    pub receipt_number: String,
}
