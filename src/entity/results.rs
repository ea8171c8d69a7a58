//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject: String,
    pub marks: f64,
    pub max_marks: f64,
    pub grade: String,
    pub exam_type: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub academic_year: String,
    pub date: Date,
    pub uploaded_by: String,
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
    pub fn into_record(
        self,
        student: &crate::models::students::entities::StudentSummary,
    ) -> crate::models::results::entities::ResultRecord {
        use crate::models::results::entities::{Grade, ResultRecord, percentage, round_to};

        // 等级以存储值为准，解析失败时按分数重新计算
        let grade = self
            .grade
            .parse::<Grade>()
            .unwrap_or_else(|_| Grade::from_marks(self.marks, self.max_marks));

        ResultRecord {
            id: self.id,
            student_id: self.student_id,
            student_name: student.username.clone(),
            roll_no: student.roll_no.clone(),
            class_name: student.class_name.clone(),
            subject: self.subject,
            marks: self.marks,
            max_marks: self.max_marks,
            percentage: round_to(percentage(self.marks, self.max_marks), 2),
            grade,
            exam_type: self.exam_type,
            remarks: self.remarks,
            academic_year: self.academic_year,
            date: self.date,
            uploaded_by: self.uploaded_by,
        }
    }
}
