use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AccountService;
use crate::models::accounts::{requests::AccountListQuery, responses::AccountListResponse};
use crate::models::ApiResponse;
use crate::services::default_error_response;

pub async fn list_accounts(
    service: &AccountService,
    request: &HttpRequest,
    query: AccountListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_accounts(query).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AccountListResponse { items },
            "Accounts retrieved successfully",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}
