use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::models::accounts::responses::AccountResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::default_error_response;

pub async fn get_account(
    service: &AccountService,
    request: &HttpRequest,
    account_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_account_by_id(account_id).await {
        Ok(Some(account)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AccountResponse { account },
            "Account retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AccountNotFound,
            "Account not found",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}
