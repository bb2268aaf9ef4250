pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::account_cache_key;
use crate::models::accounts::requests::{AccountListQuery, UpdateRoleRequest};
use crate::storage::Storage;

pub struct AccountService {
    storage: Option<Arc<dyn Storage>>,
}

impl AccountService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    /// 账号变更后让认证中间件重新从存储读取
    pub(crate) async fn evict_cached_account(&self, request: &HttpRequest, account_id: i64) {
        if let Some(cache) = super::resolve_cache(request) {
            cache.remove(&account_cache_key(account_id)).await;
        }
    }

    pub async fn list_accounts(
        &self,
        request: &HttpRequest,
        query: AccountListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_accounts(self, request, query).await
    }

    pub async fn get_account(&self, request: &HttpRequest, account_id: i64) -> ActixResult<HttpResponse> {
        get::get_account(self, request, account_id).await
    }

    pub async fn update_role(
        &self,
        request: &HttpRequest,
        account_id: i64,
        update: UpdateRoleRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_role(self, request, account_id, update).await
    }

    pub async fn delete_account(
        &self,
        request: &HttpRequest,
        account_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_account(self, request, account_id).await
    }
}
