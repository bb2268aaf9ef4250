use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, announcement_error};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_caller;

pub async fn get_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request)?;
    match storage.get_announcement(caller.account_id, id).await {
        Ok(Some(view)) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(view, "Announcement retrieved successfully"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AnnouncementNotFound,
            "Announcement not found",
        ))),
        Err(e) => Ok(announcement_error(&e)),
    }
}
