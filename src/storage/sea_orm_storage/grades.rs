use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades};
use crate::entity::prelude::Students;
use crate::errors::{Result, ScholarError};
use crate::models::grades::entities::{Grade, GradeEntry, GradeKey};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, Set,
    SqlErr, TransactionTrait,
};

impl SeaOrmStorage {
    /// 批量写入成绩
    ///
    /// 所有条目在同一事务中执行，任一失败则整体回滚。同一批次中重复的科目以最后一条为准。
    pub async fn upsert_grades_impl(
        &self,
        student_id: Option<i64>,
        entries: &[GradeEntry],
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScholarError::database_operation(format!("开启事务失败: {e}")))?;

        if let Some(student_id) = student_id {
            let student = Students::find_by_id(student_id)
                .one(&txn)
                .await
                .map_err(|e| ScholarError::database_operation(format!("查询学生失败: {e}")))?;
            if student.is_none() {
                return Err(ScholarError::not_found(format!("学生 {student_id} 不存在")));
            }
        }

        let now = chrono::Utc::now().timestamp();
        for entry in entries {
            let key = GradeKey::new(entry.subject_id, student_id);
            upsert_one(&txn, key, entry, now).await?;
        }

        txn.commit()
            .await
            .map_err(|e| ScholarError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 读取成绩：指定学生的行或全部共享行，按 ID 升序
    pub async fn list_grades_impl(&self, student_id: Option<i64>) -> Result<Vec<Grade>> {
        let filter = match student_id {
            Some(id) => Column::StudentId.eq(id),
            None => Column::StudentId.is_null(),
        };

        let grades = Grades::find()
            .filter(filter)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询成绩失败: {e}")))?;

        Ok(grades.into_iter().map(|m| m.into_grade()).collect())
    }
}

async fn upsert_one(
    txn: &DatabaseTransaction,
    key: GradeKey,
    entry: &GradeEntry,
    now: i64,
) -> Result<()> {
    match key {
        GradeKey::PerStudent {
            subject_id,
            student_id,
        } => {
            let model = ActiveModel {
                subject_id: Set(subject_id),
                student_id: Set(Some(student_id)),
                n1: Set(entry.n1),
                n2: Set(entry.n2),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            // (subject_id, student_id) 唯一索引上的插入或更新
            Grades::insert(model)
                .on_conflict(
                    OnConflict::columns([Column::SubjectId, Column::StudentId])
                        .update_columns([Column::N1, Column::N2, Column::UpdatedAt])
                        .to_owned(),
                )
                .exec_without_returning(txn)
                .await
                .map_err(|e| ScholarError::database_operation(format!("写入成绩失败: {e}")))?;
        }
        GradeKey::Shared { subject_id } => upsert_shared(txn, subject_id, entry, now).await?,
    }

    Ok(())
}

/// 共享行由部分唯一索引 `idx_grades_shared_subject` 保证每科最多一行
///
/// 先更新；没有命中时在保存点内插入。并发事务抢先插入会触发唯一约束，
/// 此时回滚到保存点并改为更新对方已提交的行。
async fn upsert_shared(
    txn: &DatabaseTransaction,
    subject_id: i64,
    entry: &GradeEntry,
    now: i64,
) -> Result<()> {
    if update_shared(txn, subject_id, entry, now).await? > 0 {
        return Ok(());
    }

    let savepoint = txn
        .begin()
        .await
        .map_err(|e| ScholarError::database_operation(format!("创建保存点失败: {e}")))?;

    let model = ActiveModel {
        subject_id: Set(subject_id),
        student_id: Set(None),
        n1: Set(entry.n1),
        n2: Set(entry.n2),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    match Grades::insert(model).exec_without_returning(&savepoint).await {
        Ok(_) => savepoint
            .commit()
            .await
            .map_err(|e| ScholarError::database_operation(format!("释放保存点失败: {e}"))),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            tracing::debug!("Shared grade for subject {} inserted concurrently, updating", subject_id);
            savepoint
                .rollback()
                .await
                .map_err(|e| ScholarError::database_operation(format!("回滚保存点失败: {e}")))?;
            // MySQL 对未变化的行返回 0，唯一冲突已说明行存在
            update_shared(txn, subject_id, entry, now).await?;
            Ok(())
        }
        Err(e) => Err(ScholarError::database_operation(format!(
            "写入共享成绩失败: {e}"
        ))),
    }
}

async fn update_shared<C: ConnectionTrait>(
    conn: &C,
    subject_id: i64,
    entry: &GradeEntry,
    now: i64,
) -> Result<u64> {
    let result = Grades::update_many()
        .col_expr(Column::N1, Expr::value(entry.n1))
        .col_expr(Column::N2, Expr::value(entry.n2))
        .col_expr(Column::UpdatedAt, Expr::value(now))
        .filter(Column::SubjectId.eq(subject_id))
        .filter(Column::StudentId.is_null())
        .exec(conn)
        .await
        .map_err(|e| ScholarError::database_operation(format!("更新共享成绩失败: {e}")))?;
    Ok(result.rows_affected)
}
