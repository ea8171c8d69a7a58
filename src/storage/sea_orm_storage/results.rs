use super::{SeaOrmStorage, db_error};
use crate::entity::results::{ActiveModel, Column, Entity as Results, Model};
use crate::entity::students::Column as StudentColumn;
use crate::errors::Result;
use crate::models::results::{
    entities::{
        DEFAULT_EXAM_TYPE, DEFAULT_MAX_MARKS, Grade, ResultRecord, academic_year_for,
    },
    requests::{ResultListQuery, UpdateResultRequest, UploadResultRequest},
};
use crate::utils::{non_empty, today};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

/// 可选文本条件的大小写无关匹配
fn matches_ignore_case(filter: Option<&str>, value: &str) -> bool {
    match filter.map(str::trim) {
        Some(f) if !f.is_empty() => value.trim().eq_ignore_ascii_case(f),
        _ => true,
    }
}

impl SeaOrmStorage {
    async fn result_records(&self, rows: Vec<Model>) -> Result<Vec<ResultRecord>> {
        let summaries = self
            .student_summaries(rows.iter().map(|m| m.student_id))
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|m| {
                let student = summaries.get(&m.student_id)?;
                Some(m.into_record(student))
            })
            .collect())
    }

    /// 写入成绩，缺省字段取默认值，等级由分数计算
    pub async fn create_result_impl(
        &self,
        req: UploadResultRequest,
        uploaded_by: &str,
    ) -> Result<ResultRecord> {
        let now = chrono::Utc::now().timestamp();
        let date = req.date.unwrap_or_else(today);
        let max_marks = req.max_marks.unwrap_or(DEFAULT_MAX_MARKS);
        let exam_type = non_empty(req.exam_type).unwrap_or_else(|| DEFAULT_EXAM_TYPE.to_string());
        let academic_year =
            non_empty(req.academic_year).unwrap_or_else(|| academic_year_for(today()));

        let model = ActiveModel {
            student_id: Set(req.student_id),
            subject: Set(req.subject.trim().to_string()),
            marks: Set(req.marks),
            max_marks: Set(max_marks),
            grade: Set(Grade::from_marks(req.marks, max_marks).to_string()),
            exam_type: Set(exam_type),
            remarks: Set(non_empty(req.remarks)),
            academic_year: Set(academic_year),
            date: Set(date),
            uploaded_by: Set(uploaded_by.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| db_error("Failed to upload result", e))?;

        let student_id = model.student_id;
        self.result_records(vec![model]).await?.pop().ok_or_else(|| {
            crate::errors::SchoolSyncError::not_found(format!("Student {student_id} not found"))
        })
    }

    pub async fn result_exists_impl(
        &self,
        student_id: i64,
        subject: &str,
        exam_type: &str,
        academic_year: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool> {
        let mut select = Results::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Subject.eq(subject))
            .filter(Column::ExamType.eq(exam_type))
            .filter(Column::AcademicYear.eq(academic_year));
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to check result", e))?;

        Ok(count > 0)
    }

    pub async fn get_result_by_id_impl(&self, id: i64) -> Result<Option<ResultRecord>> {
        let Some(model) = Results::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query result", e))?
        else {
            return Ok(None);
        };

        Ok(self.result_records(vec![model]).await?.pop())
    }

    /// 班级、学年、日期区间在 SQL 中过滤；科目与考试类型大小写无关，在内存中过滤
    pub async fn list_results_impl(&self, query: ResultListQuery) -> Result<Vec<ResultRecord>> {
        let mut select = Results::find();

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(academic_year) = query.academic_year.as_deref().map(str::trim)
            && !academic_year.is_empty()
        {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        if let Some(from) = query.date_from {
            select = select.filter(Column::Date.gte(from));
        }

        if let Some(to) = query.date_to {
            select = select.filter(Column::Date.lte(to));
        }

        if let Some(class_name) = query.class_name.as_deref().map(str::trim)
            && !class_name.is_empty()
        {
            select = select
                .join(
                    JoinType::InnerJoin,
                    crate::entity::results::Relation::Students.def(),
                )
                .filter(StudentColumn::ClassName.eq(class_name));
        }

        let rows: Vec<Model> = select
            .order_by_desc(Column::Date)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list results", e))?
            .into_iter()
            .filter(|m| {
                matches_ignore_case(query.subject.as_deref(), &m.subject)
                    && matches_ignore_case(query.exam_type.as_deref(), &m.exam_type)
            })
            .collect();

        self.result_records(rows).await
    }

    /// 部分更新，等级按最终分数重新计算
    pub async fn update_result_impl(
        &self,
        id: i64,
        update: UpdateResultRequest,
    ) -> Result<Option<ResultRecord>> {
        let Some(existing) = Results::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to query result", e))?
        else {
            return Ok(None);
        };

        let marks = update.marks.unwrap_or(existing.marks);
        let max_marks = update.max_marks.unwrap_or(existing.max_marks);

        let mut model = ActiveModel {
            id: Set(id),
            marks: Set(marks),
            max_marks: Set(max_marks),
            grade: Set(Grade::from_marks(marks, max_marks).to_string()),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(subject) = non_empty(update.subject) {
            model.subject = Set(subject);
        }
        if let Some(exam_type) = non_empty(update.exam_type) {
            model.exam_type = Set(exam_type);
        }
        if let Some(academic_year) = non_empty(update.academic_year) {
            model.academic_year = Set(academic_year);
        }
        if let Some(remarks) = update.remarks {
            model.remarks = Set(non_empty(Some(remarks)));
        }
        if let Some(date) = update.date {
            model.date = Set(date);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("Failed to update result", e))?;

        Ok(self.result_records(vec![updated]).await?.pop())
    }

    pub async fn delete_result_impl(&self, id: i64) -> Result<bool> {
        let result = Results::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("Failed to delete result", e))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_results_uploaded_by_impl(&self, username: &str) -> Result<u64> {
        Results::find()
            .filter(Column::UploadedBy.eq(username))
            .count(&self.db)
            .await
            .map_err(|e| db_error("Failed to count results", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SchoolSyncError;
    use crate::models::users::{entities::UserRole, requests::CreateUserRequest};
    use chrono::NaiveDate;

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

    fn upload(student_id: i64, subject: &str, marks: f64) -> UploadResultRequest {
        UploadResultRequest {
            student_id,
            subject: subject.to_string(),
            marks,
            max_marks: None,
            exam_type: None,
            remarks: None,
            academic_year: Some("2025-26".into()),
            date: NaiveDate::from_ymd_opt(2025, 9, 15),
        }
    }

    #[tokio::test]
    async fn test_upload_applies_defaults_and_grade() {
        let (storage, student_id) = storage_with_student().await;

        let record = storage
            .create_result_impl(upload(student_id, "Maths", 91.0), "mrs.rao")
            .await
            .unwrap();
        assert_eq!(record.max_marks, 100.0);
        assert_eq!(record.exam_type, "Mid-term");
        assert_eq!(record.grade, Grade::APlus);
        assert_eq!(record.uploaded_by, "mrs.rao");

        let err = storage
            .create_result_impl(upload(student_id, "Maths", 50.0), "mrs.rao")
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolSyncError::Conflict(_)));
        assert_eq!(storage.count_results_uploaded_by_impl("mrs.rao").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_recomputes_grade() {
        let (storage, student_id) = storage_with_student().await;
        let record = storage
            .create_result_impl(upload(student_id, "Science", 95.0), "mrs.rao")
            .await
            .unwrap();

        let updated = storage
            .update_result_impl(
                record.id,
                UpdateResultRequest {
                    marks: Some(40.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.grade, Grade::C);
        assert_eq!(updated.subject, "Science");
    }

    #[tokio::test]
    async fn test_list_filters_case_insensitive() {
        let (storage, student_id) = storage_with_student().await;
        storage
            .create_result_impl(upload(student_id, "Maths", 70.0), "mrs.rao")
            .await
            .unwrap();
        storage
            .create_result_impl(upload(student_id, "English", 60.0), "mrs.rao")
            .await
            .unwrap();

        let maths = storage
            .list_results_impl(ResultListQuery {
                subject: Some("maths".into()),
                exam_type: Some("MID-TERM".into()),
                class_name: Some("10-A".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(maths.len(), 1);
        assert_eq!(maths[0].subject, "Maths");

        let out_of_range = storage
            .list_results_impl(ResultListQuery {
                date_to: NaiveDate::from_ymd_opt(2025, 9, 1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(out_of_range.is_empty());
    }
}
