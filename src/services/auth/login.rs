use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::{requests::LoginRequest, responses::LoginResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::normalize_email;

use super::AuthService;

const BAD_CREDENTIALS: &str = "Email or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();
    let email = normalize_email(&login_request.email);

    let account = match storage.get_account_by_email(&email).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::AuthFailed, BAD_CREDENTIALS)));
        }
        Err(e) => return Ok(crate::services::default_error_response(&e)),
    };

    if !verify_password(&login_request.password, &account.password_hash) {
        tracing::info!("Failed login attempt for account {}", account.id);
        return Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::AuthFailed, BAD_CREDENTIALS)));
    }

    if let Err(e) = storage.update_last_login(account.id).await {
        tracing::warn!("Failed to record last login for {}: {}", account.id, e);
    }

    let refresh_ttl = if login_request.remember_me {
        chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)
    } else {
        chrono::Duration::days(config.jwt.refresh_token_expiry)
    };

    let token_pair = match account.generate_token_pair(Some(refresh_ttl)) {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            return Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Login failed, unable to generate token",
            )));
        }
    };

    tracing::info!("Account {} logged in", account.id);
    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_ttl);
    let response = LoginResponse {
        access_token: token_pair.access_token,
        expires_in: config.jwt.access_token_expiry * 60, // 秒
        account,
        created_at: chrono::Utc::now(),
    };

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
