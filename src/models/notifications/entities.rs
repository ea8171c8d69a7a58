use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

crate::define_string_enum! {
    /// 通知类型
    NotificationType {
        Absence => "ABSENCE",
        AbsenceUpdate => "ABSENCE_UPDATE",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub fn absence_message(date: NaiveDate) -> String {
    format!("You were marked Absent for {}", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absence_message() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        assert_eq!(
            absence_message(date),
            "You were marked Absent for 2025-08-15"
        );
        assert_eq!(NotificationType::AbsenceUpdate.as_str(), "ABSENCE_UPDATE");
    }
}
