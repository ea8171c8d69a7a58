//! 费用实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub fee_type: String,
    pub amount: f64,
    pub due_date: Date,
    pub paid_date: Option<Date>,
    pub status: String,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub receipt_number: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id",
        on_delete = "Cascade"
    )]
    Students,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Students.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_fee(
        self,
        student: &crate::models::students::entities::StudentSummary,
    ) -> crate::models::fees::entities::Fee {
        use crate::models::fees::entities::{Fee, FeeStatus, FeeType};

        Fee {
            id: self.id,
            student_id: self.student_id,
            student_name: student.username.clone(),
            roll_no: student.roll_no.clone(),
            class_name: student.class_name.clone(),
            fee_type: self.fee_type.parse::<FeeType>().unwrap_or(FeeType::Other),
            amount: self.amount,
            due_date: self.due_date,
            paid_date: self.paid_date,
            status: self.status.parse::<FeeStatus>().unwrap_or(FeeStatus::Pending),
            payment_method: self.payment_method,
            transaction_id: self.transaction_id,
            receipt_number: self.receipt_number,
            remarks: self.remarks,
        }
    }
}
