use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::validate::validate_new;
use super::{AnnouncementService, announcement_error};
use crate::models::announcements::requests::CreateAnnouncementRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::can_create_announcement;
use crate::services::current_caller;

pub async fn create_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    create: CreateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    if !can_create_announcement(caller.role) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AnnouncementPermissionDenied,
            "Only staff can publish announcements",
        )));
    }

    let announcement = match validate_new(&create) {
        Ok(announcement) => announcement,
        Err(field_error) => {
            let message = field_error.message.clone();
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::AnnouncementInvalid,
                field_error,
                message,
            )));
        }
    };

    let storage = service.get_storage(request)?;
    match storage
        .create_announcement(caller.account_id, announcement)
        .await
    {
        Ok(view) => {
            tracing::info!("Announcement {} published by {}", view.id, caller.account_id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(view, "Announcement published successfully")))
        }
        Err(e) => Ok(announcement_error(&e)),
    }
}
