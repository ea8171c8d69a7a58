use super::{SeaOrmStorage, db_error};
use crate::entity::fees::{ActiveModel, Column, Entity as Fees, Model};
use crate::errors::{Result, SchoolSyncError};
use crate::models::fees::{
    entities::{Fee, FeeStatus},
    requests::{CreateFeeRequest, FeeListQuery, FeePayment, UpdateFeeRequest},
};
use crate::utils::non_empty;
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    async fn fee_records(&self, rows: Vec<Model>) -> Result<Vec<Fee>> {
        let summaries = self
            .student_summaries(rows.iter().map(|m| m.student_id))
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let student = summaries.get(&m.student_id)?;
                Some(m.into_fee(student))
            })
            .collect())
    }

    pub async fn create_fee_impl(&self, req: CreateFeeRequest) -> Result<Fee> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            fee_type: Set(req.fee_type.to_string()),
            amount: Set(req.amount),
            due_date: Set(req.due_date),
            paid_date: Set(None),
            status: Set(req.status.unwrap_or(FeeStatus::Pending).to_string()),
            payment_method: Set(None),
            transaction_id: Set(None),
            receipt_number: Set(None),
            remarks: Set(non_empty(req.remarks)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("Failed to create fee", e))?;

        let student_id = model.student_id;
        self.fee_records(vec![model])
            .await?
            .pop()
            .ok_or_else(|| SchoolSyncError::not_found(format!("Student {student_id} not found")))
    }

    pub async fn get_fee_by_id_impl(&self, id: i64) -> Result<Option<Fee>> {
        let Some(model) = Fees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query fee", e))?
        else {
            return Ok(None);
        };

        Ok(self.fee_records(vec![model]).await?.pop())
    }

    /// 到期日倒序
    pub async fn list_fees_impl(&self, query: FeeListQuery) -> Result<Vec<Fee>> {
        let mut select = Fees::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let rows = select
            .order_by_desc(Column::DueDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list fees", e))?;

        self.fee_records(rows).await
    }

    pub async fn update_fee_impl(&self, id: i64, update: UpdateFeeRequest) -> Result<Option<Fee>> {
        let exists = Fees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query fee", e))?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(fee_type) = update.fee_type {
            model.fee_type = Set(fee_type.to_string());
        }
        if let Some(amount) = update.amount {
            model.amount = Set(amount);
        }
        if let Some(due_date) = update.due_date {
            model.due_date = Set(due_date);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(non_empty(Some(remarks)));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update fee", e))?;

        Ok(self.fee_records(vec![updated]).await?.pop())
    }

    /// 记录缴费：状态置为 Paid 并写入流水号与收据号
    ///
    /// 仅更新尚未缴清的记录；已缴清返回 Conflict，并发的重复缴费只有一次生效。
    pub async fn record_fee_payment_impl(
        &self,
        id: i64,
        payment: FeePayment,
    ) -> Result<Option<Fee>> {
        use sea_orm::sea_query::Expr;

        let result = Fees::update_many()
            .col_expr(Column::Status, Expr::value(FeeStatus::Paid.to_string()))
            .col_expr(Column::PaidDate, Expr::value(payment.paid_date))
            .col_expr(Column::PaymentMethod, Expr::value(payment.payment_method))
            .col_expr(Column::TransactionId, Expr::value(payment.transaction_id))
            .col_expr(Column::ReceiptNumber, Expr::value(payment.receipt_number))
            .col_expr(
                Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(FeeStatus::Paid.to_string()))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to record payment", e))?;

        let Some(model) = Fees::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query fee", e))?
        else {
            return Ok(None);
        };

        if result.rows_affected == 0 {
            return Err(SchoolSyncError::conflict(format!(
                "Fee {id} has already been paid"
            )));
        }

        Ok(self.fee_records(vec![model]).await?.pop())
    }

    pub async fn delete_fee_impl(&self, id: i64) -> Result<bool> {
        let result = Fees::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete fee", e))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn mark_overdue_fees_impl(&self, today: NaiveDate) -> Result<u64> {
        let result = Fees::update_many()
            .col_expr(
                Column::Status,
                sea_orm::sea_query::Expr::value(FeeStatus::Overdue.to_string()),
            )
            .col_expr(
                Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(Column::Status.eq(FeeStatus::Pending.to_string()))
            .filter(Column::DueDate.lt(today))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to mark overdue fees", e))?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fees::entities::FeeType;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};

    async fn storage_with_student() -> (SeaOrmStorage, i64) {
        let storage = SeaOrmStorage::connect("sqlite::memory:", 1, 5)
            .await
            .expect("in-memory database");
        let student = storage
            .create_student_impl(
                CreateUserRequest {
                    username: "asha".into(),
                    email: "asha@school.in".into(),
                    phone: None,
                    password: "hash".into(),
                    role: UserRole::Student,
                },
                "2501".into(),
                "10-A".into(),
            )
            .await
            .unwrap();
        (storage, student.id)
    }

    fn fee(student_id: i64, due: NaiveDate) -> CreateFeeRequest {
        CreateFeeRequest {
            student_id,
            fee_type: FeeType::Tuition,
            amount: 1500.0,
            due_date: due,
            status: None,
            remarks: None,
        }
    }

    #[tokio::test]
    async fn test_overdue_sweep_only_touches_past_pending() {
        let (storage, student_id) = storage_with_student().await;
        let today = NaiveDate::from_ymd_opt(2025, 8, 10).unwrap();

        let past = storage
            .create_fee_impl(fee(student_id, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()))
            .await
            .unwrap();
        let future = storage
            .create_fee_impl(fee(student_id, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()))
            .await
            .unwrap();
        assert_eq!(past.status, FeeStatus::Pending);

        assert_eq!(storage.mark_overdue_fees_impl(today).await.unwrap(), 1);
        let past = storage.get_fee_by_id_impl(past.id).await.unwrap().unwrap();
        let future = storage.get_fee_by_id_impl(future.id).await.unwrap().unwrap();
        assert_eq!(past.status, FeeStatus::Overdue);
        assert_eq!(future.status, FeeStatus::Pending);
    }

    #[tokio::test]
    async fn test_record_payment() {
        let (storage, student_id) = storage_with_student().await;
        let created = storage
            .create_fee_impl(fee(student_id, NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()))
            .await
            .unwrap();

        let paid = storage
            .record_fee_payment_impl(
                created.id,
                FeePayment {
                    paid_date: NaiveDate::from_ymd_opt(2025, 8, 2).unwrap(),
                    payment_method: "Online".into(),
                    transaction_id: "TXN1".into(),
                    receipt_number: format!("RCP-{}-1", created.id),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(paid.is_paid());
        assert_eq!(paid.transaction_id.as_deref(), Some("TXN1"));

        // 再次缴费不会覆盖第一次的流水号
        let again = storage
            .record_fee_payment_impl(
                created.id,
                FeePayment {
                    paid_date: NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
                    payment_method: "Online".into(),
                    transaction_id: "TXN2".into(),
                    receipt_number: format!("RCP-{}-2", created.id),
                },
            )
            .await;
        assert!(matches!(again, Err(SchoolSyncError::Conflict(_))));
        let stored = storage.get_fee_by_id_impl(created.id).await.unwrap().unwrap();
        assert_eq!(stored.transaction_id.as_deref(), Some("TXN1"));

        let paid_only = storage
            .list_fees_impl(FeeListQuery {
                student_id: Some(student_id),
                status: Some(FeeStatus::Paid),
            })
            .await
            .unwrap();
        assert_eq!(paid_only.len(), 1);
    }
}
