use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::ScholarError;
use crate::models::accounts::entities::AccountRole;
use crate::models::accounts::requests::CreateAccountRequest;
use crate::models::auth::requests::RegisterRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    display_name_from_email, normalize_email, validate_email, validate_password,
};

use super::AuthService;

/// 自助注册：角色固定为 user
pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let email = normalize_email(&register_request.email);
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AccountEmailInvalid, msg)));
    }
    if let Err(msg) = validate_password(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::AccountPasswordInvalid, msg)));
    }

    let display_name = register_request
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| display_name_from_email(&email));

    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(error_response(&e, ErrorCode::RegisterFailed)),
    };

    let create_request = CreateAccountRequest {
        email,
        password_hash,
        display_name,
        role: AccountRole::User,
    };

    match storage.create_account(create_request).await {
        Ok(account) => {
            tracing::info!("Registered account {}", account.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(account, "Registration successful")))
        }
        Err(e @ ScholarError::Conflict(_)) => {
            Ok(error_response(&e, ErrorCode::AccountEmailAlreadyExists))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::RegisterFailed)),
    }
}
