use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: Option<String>,
    pub contact: Option<String>,
}

/// 前端结账组件所需参数
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct CheckoutResponse {
    pub provider: String,
    pub key: String,
    pub fee_id: i64,
    /// 最小货币单位
    pub amount: i64,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub prefill: CheckoutPrefill,
}
