use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::accounts::entities::AccountRole;
use crate::models::accounts::requests::{AccountListQuery, UpdateRoleRequest};
use crate::services::AccountService;
use crate::utils::SafeIDI64;

static ACCOUNT_SERVICE: Lazy<AccountService> = Lazy::new(AccountService::new_lazy);

pub async fn list_accounts(
    req: HttpRequest,
    query: web::Query<AccountListQuery>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.list_accounts(&req, query.into_inner()).await
}

pub async fn get_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.get_account(&req, id.0).await
}

pub async fn update_role(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateRoleRequest>,
) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.update_role(&req, id.0, body.into_inner()).await
}

pub async fn delete_account(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ACCOUNT_SERVICE.delete_account(&req, id.0).await
}

// 账号管理仅限管理员
pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/accounts")
            .wrap(middlewares::RequireJWT)
            .service(
                web::scope("")
                    .wrap(middlewares::RequireRole::new_any(AccountRole::admin_roles()))
                    .route("", web::get().to(list_accounts))
                    .route("/{id}", web::get().to(get_account))
                    .route("/{id}/role", web::put().to(update_role))
                    .route("/{id}", web::delete().to(delete_account)),
            ),
    );
}
