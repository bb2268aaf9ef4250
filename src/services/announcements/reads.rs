use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, announcement_error};
use crate::models::ApiResponse;
use crate::models::announcements::responses::{MarkAllReadResponse, UnreadCountResponse};
use crate::services::current_caller;

/// 幂等，重复标记只刷新已读时间
pub async fn mark_read(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request)?;
    match storage.mark_announcement_read(caller.account_id, id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Marked as read"))),
        Err(e) => Ok(announcement_error(&e)),
    }
}

pub async fn mark_all_read(
    service: &AnnouncementService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request)?;
    match storage.mark_all_announcements_read(caller.account_id).await {
        Ok(marked) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            MarkAllReadResponse { marked },
            "All announcements marked as read",
        ))),
        Err(e) => Ok(announcement_error(&e)),
    }
}

pub async fn unread_count(
    service: &AnnouncementService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request)?;
    match storage.count_unread_announcements(caller.account_id).await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UnreadCountResponse { count },
            "Unread count retrieved successfully",
        ))),
        Err(e) => Ok(announcement_error(&e)),
    }
}
