use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 费用类别
    FeeType {
        Tuition => "Tuition",
        Library => "Library",
        Sports => "Sports",
        Laboratory => "Laboratory",
        Transport => "Transport",
        Other => "Other",
    }
}

crate::define_string_enum! {
    /// 费用状态
    FeeStatus {
        Pending => "Pending",
        Paid => "Paid",
        Overdue => "Overdue",
    }
}

// 费用记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/fee.ts")]
pub struct Fee {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub roll_no: String,
    pub class_name: String,
    pub fee_type: FeeType,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: FeeStatus,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub receipt_number: Option<String>,
    pub remarks: Option<String>,
}

impl Fee {
    pub fn is_paid(&self) -> bool {
        self.status == FeeStatus::Paid
    }

    /// 金额转为最小货币单位（如 INR 的 paise）
    pub fn amount_in_minor_units(&self) -> i64 {
        (self.amount * 100.0).round() as i64
    }

    /// 渲染纯文本收据
    pub fn render_receipt(&self, school_name: &str) -> String {
        let dash = "-".repeat(44);
        let or_dash = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
        let paid_date = self
            .paid_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());

        let mut lines = vec![
            school_name.to_string(),
            "FEE PAYMENT RECEIPT".to_string(),
            dash.clone(),
            format!("Receipt No   : {}", or_dash(&self.receipt_number)),
            format!("Student      : {}", self.student_name),
            format!("Roll No      : {}", self.roll_no),
            format!("Class        : {}", self.class_name),
            format!("Fee Type     : {}", self.fee_type),
            format!("Amount       : {:.2}", self.amount),
            format!("Due Date     : {}", self.due_date.format("%Y-%m-%d")),
            format!("Paid On      : {}", paid_date),
            format!("Method       : {}", or_dash(&self.payment_method)),
            format!("Transaction  : {}", or_dash(&self.transaction_id)),
        ];
        if let Some(remarks) = &self.remarks {
            lines.push(format!("Remarks      : {remarks}"));
        }
        lines.push(dash);
        lines.push("This is a computer generated receipt.".to_string());
        lines.join("\n") + "\n"
    }
}

/// 生成支付流水号与收据号
pub fn generate_transaction_id(now_millis: i64) -> String {
    format!("TXN{now_millis}")
}

pub fn generate_receipt_number(fee_id: i64, now_millis: i64) -> String {
    format!("RCP-{fee_id}-{now_millis}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(status: FeeStatus) -> Fee {
        Fee {
            id: 7,
            student_id: 1,
            student_name: "ravi".into(),
            roll_no: "2501".into(),
            class_name: "10A".into(),
            fee_type: FeeType::Tuition,
            amount: 1500.5,
            due_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            paid_date: NaiveDate::from_ymd_opt(2025, 6, 20),
            status,
            payment_method: Some("Razorpay".into()),
            transaction_id: Some("pay_123".into()),
            receipt_number: Some(generate_receipt_number(7, 1000)),
            remarks: None,
        }
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(generate_transaction_id(1700000000000), "TXN1700000000000");
        assert_eq!(generate_receipt_number(7, 42), "RCP-7-42");
    }

    #[test]
    fn test_minor_units() {
        assert_eq!(fee(FeeStatus::Pending).amount_in_minor_units(), 150050);
    }

    #[test]
    fn test_receipt_text() {
        let receipt = fee(FeeStatus::Paid).render_receipt("Green Valley School");
        assert!(receipt.starts_with("Green Valley School\n"));
        assert!(receipt.contains("Receipt No   : RCP-7-1000"));
        assert!(receipt.contains("Amount       : 1500.50"));
        assert!(receipt.contains("Paid On      : 2025-06-20"));
        assert!(!receipt.contains("Remarks"));
    }
}
