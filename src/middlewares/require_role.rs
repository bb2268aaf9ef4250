/*!
 * 基于角色的访问控制中间件
 *
 * 必须挂在 RequireJWT 之后，角色取自 RequireJWT 写入请求扩展的账号：
 *
 * ```rust,ignore
 * web::scope("/api/v1/accounts")
 *     .wrap(RequireRole::new(&AccountRole::Admin))
 *     .wrap(RequireJWT)
 * ```
 *
 * 多个角色任一满足即可：`RequireRole::new_any(AccountRole::staff_roles())`。
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::{middlewares::RequireJWT, models::ErrorCode, models::accounts::entities::AccountRole};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    required_roles: Vec<AccountRole>,
}

impl RequireRole {
    pub fn new(role: &AccountRole) -> Self {
        Self {
            required_roles: vec![*role],
        }
    }

    /// 任一角色满足即可
    pub fn new_any(roles: &[&AccountRole]) -> Self {
        Self {
            required_roles: roles.iter().map(|r| **r).collect(),
        }
    }

    pub fn allows(&self, role: AccountRole) -> bool {
        self.required_roles.contains(&role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            policy: self.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    policy: RequireRole,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let policy = self.policy.clone();

        Box::pin(async move {
            let account_id = RequireJWT::extract_account_id(req.request());
            let role = RequireJWT::extract_account_role(req.request());

            match (account_id, role) {
                (Some(account_id), Some(role)) => {
                    if policy.allows(role) {
                        return Ok(srv.call(req).await?.map_into_left_body());
                    }
                    info!(
                        "Access denied for account {} (role: {}). Required roles: {:?}",
                        account_id, role, policy.required_roles
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::FORBIDDEN,
                            ErrorCode::Forbidden,
                            "Access denied.",
                        )
                        .map_into_right_body(),
                    ))
                }
                _ => {
                    info!("Role check without an authenticated account; is RequireJWT applied?");
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_sets() {
        let staff = RequireRole::new_any(AccountRole::staff_roles());
        assert!(staff.allows(AccountRole::Manager));
        assert!(staff.allows(AccountRole::Admin));
        assert!(!staff.allows(AccountRole::User));

        let admin = RequireRole::new(&AccountRole::Admin);
        assert!(!admin.allows(AccountRole::Manager));
    }
}
