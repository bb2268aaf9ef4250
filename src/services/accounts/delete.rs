use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::default_error_response;

pub async fn delete_account(
    service: &AccountService,
    request: &HttpRequest,
    account_id: i64,
) -> ActixResult<HttpResponse> {
    if RequireJWT::extract_account_id(request) == Some(account_id) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CanNotDeleteCurrentAccount,
            "You cannot delete your own account",
        )));
    }

    let storage = service.get_storage(request)?;
    match storage.delete_account(account_id).await {
        Ok(true) => {
            service.evict_cached_account(request, account_id).await;
            tracing::info!("Account {} deleted", account_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Account deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AccountNotFound,
            "Account not found",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}
