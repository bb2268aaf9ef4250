use super::SeaOrmStorage;
use crate::entity::accounts::{ActiveModel, Column, Entity as Accounts};
use crate::errors::{Result, ScholarError};
use crate::models::accounts::{
    entities::{Account, AccountRole},
    requests::{AccountListQuery, CreateAccountRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建账号，邮箱重复时返回 Conflict
    pub async fn create_account_impl(&self, req: CreateAccountRequest) -> Result<Account> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            email: Set(req.email),
            password_hash: Set(req.password_hash),
            display_name: Set(req.display_name),
            role: Set(req.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            let err = ScholarError::from(e);
            match err {
                ScholarError::Conflict(_) => ScholarError::conflict("邮箱已被注册"),
                other => other,
            }
        })?;

        Ok(result.into_account())
    }

    /// 通过 ID 获取账号
    pub async fn get_account_by_id_impl(&self, id: i64) -> Result<Option<Account>> {
        let result = Accounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 通过邮箱获取账号
    pub async fn get_account_by_email_impl(&self, email: &str) -> Result<Option<Account>> {
        let result = Accounts::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_account()))
    }

    /// 列出账号
    pub async fn list_accounts_impl(&self, query: AccountListQuery) -> Result<Vec<Account>> {
        let mut select = Accounts::find();

        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        let accounts = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询账号列表失败: {e}")))?;

        Ok(accounts.into_iter().map(|m| m.into_account()).collect())
    }

    /// 修改账号角色
    pub async fn update_account_role_impl(
        &self,
        id: i64,
        role: AccountRole,
    ) -> Result<Option<Account>> {
        let existing = Accounts::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("查询账号失败: {e}")))?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.role = Set(role.to_string());
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("更新账号角色失败: {e}")))?;

        Ok(Some(updated.into_account()))
    }

    /// 删除账号
    pub async fn delete_account_impl(&self, id: i64) -> Result<bool> {
        let result = Accounts::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("删除账号失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Accounts::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计账号数量
    pub async fn count_accounts_impl(&self) -> Result<u64> {
        let count = Accounts::find()
            .count(&self.db)
            .await
            .map_err(|e| ScholarError::database_operation(format!("统计账号数量失败: {e}")))?;

        Ok(count)
    }
}
