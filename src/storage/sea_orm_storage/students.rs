use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, ScholarError};
use crate::models::students::{entities::Student, requests::CreateStudentRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生档案，学号重复时返回 Conflict
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let model = ActiveModel {
            name: Set(req.name),
            email: Set(req.email),
            enrollment_code: Set(req.enrollment_code),
            course_name: Set(req.course_name),
            account_id: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            match ScholarError::from(e) {
                ScholarError::Conflict(_) => ScholarError::conflict("学号已存在"),
                other => other,
            }
        })?;

        Ok(result.into_student())
    }

    /// 列出全部学生档案
    pub async fn list_students_impl(&self) -> Result<Vec<Student>> {
        let students = Students::find()
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(students.into_iter().map(|m| m.into_student()).collect())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_account_impl(&self, account_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::AccountId.eq(account_id))
            .one(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 删除学生档案，成绩随之级联删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 认领学生档案
    ///
    /// 档案只能被认领一次，一个账号也只能认领一个档案。
    pub async fn claim_student_impl(
        &self,
        account_id: i64,
        enrollment_code: &str,
    ) -> Result<Student> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ScholarError::database_operation(format!("开启事务失败: {e}")))?;

        let student = Students::find()
            .filter(Column::EnrollmentCode.eq(enrollment_code))
            .one(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询学生失败: {e}")))?
            .ok_or_else(|| ScholarError::not_found(format!("学号 {enrollment_code} 不存在")))?;

        if student.account_id.is_some() {
            return Err(ScholarError::conflict("该学生档案已被认领"));
        }

        let owned = Students::find()
            .filter(Column::AccountId.eq(account_id))
            .one(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询学生失败: {e}")))?;
        if owned.is_some() {
            return Err(ScholarError::conflict("该账号已认领其他学生档案"));
        }

        // 仅在尚未认领时写入，避免并发认领覆盖
        let result = Students::update_many()
            .col_expr(
                Column::AccountId,
                sea_orm::sea_query::Expr::value(Some(account_id)),
            )
            .filter(Column::Id.eq(student.id))
            .filter(Column::AccountId.is_null())
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(ScholarError::conflict("该学生档案已被认领"));
        }

        let claimed = Students::find_by_id(student.id)
            .one(&txn)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询学生失败: {e}")))?
            .ok_or_else(|| ScholarError::not_found("学生档案不存在"))?;

        txn.commit()
            .await
            .map_err(|e| ScholarError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(claimed.into_student())
    }
}
