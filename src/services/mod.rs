pub mod accounts;
pub mod announcements;
pub mod auth;
pub mod catalog;
pub mod grades;
pub mod students;
pub mod system;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::cache::ObjectCache;
use crate::errors::ScholarError;
use crate::middlewares::RequireJWT;
use crate::models::accounts::entities::Caller;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub use accounts::AccountService;
pub use announcements::AnnouncementService;
pub use auth::AuthService;
pub use catalog::CatalogService;
pub use grades::GradeService;
pub use students::StudentService;
pub use system::SystemService;

/// 服务未注入存储时，从 app_data 中取
pub(crate) fn resolve_storage(
    injected: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> ActixResult<Arc<dyn Storage>> {
    if let Some(storage) = injected {
        return Ok(storage.clone());
    }
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("Storage not found in app data");
            actix_web::error::ErrorInternalServerError("storage unavailable")
        })
}

pub(crate) fn resolve_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 由认证中间件写入的调用者；缺失时返回 401 响应
pub(crate) fn current_caller(request: &HttpRequest) -> Result<Caller, HttpResponse> {
    RequireJWT::extract_caller(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))
    })
}

/// 把业务错误映射为 HTTP 响应；状态码取自错误分类，业务码由调用方指定
pub(crate) fn error_response(err: &ScholarError, code: ErrorCode) -> HttpResponse {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!("{}", err);
    } else {
        tracing::debug!("Request rejected: {}", err);
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}

/// 使用错误分类对应的默认业务码
pub(crate) fn default_error_response(err: &ScholarError) -> HttpResponse {
    error_response(err, ErrorCode::from_error(err))
}
