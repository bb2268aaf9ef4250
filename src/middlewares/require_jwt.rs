/*!
 * JWT 认证中间件
 *
 * 校验 `Authorization: Bearer <access token>`，并从存储（优先缓存）中解析出当前账号，
 * 写入请求扩展供后续中间件与处理程序使用：
 *
 * ```rust,ignore
 * web::scope("/api/v1/grades")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_grades))
 *
 * async fn list_grades(req: HttpRequest) -> Result<HttpResponse> {
 *     let caller = RequireJWT::extract_caller(&req);
 *     // ...
 * }
 * ```
 *
 * 权限判断一律使用存储中账号的当前角色，令牌里的 `role` 字段不参与授权。
 * 账号被删除后，其令牌在下一次请求时即失效。
 */

use crate::cache::{CacheResult, ObjectCache, account_cache_key};
use crate::config::AppConfig;
use crate::models::accounts::entities::{Account, AccountRole, Caller};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info, warn};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

async fn resolve_account(req: &ServiceRequest) -> Result<Account, String> {
    let token = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| "Missing or invalid Authorization header".to_string())?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        "Invalid or expired token".to_string()
    })?;
    let account_id = claims
        .account_id()
        .ok_or_else(|| "Invalid account id in token".to_string())?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());
    let key = account_cache_key(account_id);

    if let Some(cache) = &cache
        && let CacheResult::Found(account) = cache.get_json::<Account>(&key).await
    {
        return Ok(account);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            warn!("Storage missing from app data");
            "Authentication backend unavailable".to_string()
        })?;

    let account = storage
        .get_account_by_id(account_id)
        .await
        .map_err(|e| {
            warn!("Failed to load account {}: {}", account_id, e);
            "Failed to retrieve account".to_string()
        })?
        .ok_or_else(|| "Account no longer exists".to_string())?;

    if let Some(cache) = &cache {
        cache
            .insert_json(key, &account, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(account)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS 预检请求直接放行给 Cors 中间件处理
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            match resolve_account(&req).await {
                Ok(account) => {
                    debug!("JWT authentication successful for account {}", account.id);
                    req.extensions_mut().insert(account);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    info!("JWT authentication failed for {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// 当前请求的账号，须在 RequireJWT 之后使用
    pub fn extract_account(req: &actix_web::HttpRequest) -> Option<Account> {
        req.extensions().get::<Account>().cloned()
    }

    pub fn extract_account_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<Account>().map(|account| account.id)
    }

    pub fn extract_account_role(req: &actix_web::HttpRequest) -> Option<AccountRole> {
        req.extensions().get::<Account>().map(|account| account.role)
    }

    pub fn extract_caller(req: &actix_web::HttpRequest) -> Option<Caller> {
        req.extensions().get::<Account>().map(Account::as_caller)
    }
}
