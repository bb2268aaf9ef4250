use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::models::accounts::{requests::UpdateRoleRequest, responses::AccountResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

pub async fn update_role(
    service: &AccountService,
    request: &HttpRequest,
    account_id: i64,
    update: UpdateRoleRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.update_account_role(account_id, update.role).await {
        Ok(Some(account)) => {
            service.evict_cached_account(request, account_id).await;
            tracing::info!("Account {} role changed to {}", account_id, account.role);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                AccountResponse { account },
                "Role updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AccountNotFound,
            "Account not found",
        ))),
        Err(e) => Ok(error_response(&e, ErrorCode::AccountUpdateFailed)),
    }
}
