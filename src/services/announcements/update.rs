use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::validate::validate_patch;
use super::{AnnouncementService, announcement_error};
use crate::models::announcements::requests::UpdateAnnouncementRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::current_caller;

pub async fn update_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
    update: UpdateAnnouncementRequest,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let patch = match validate_patch(&update) {
        Ok(patch) => patch,
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
    match storage.update_announcement(&caller, id, patch).await {
        Ok(view) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(view, "Announcement updated successfully"))),
        Err(e) => Ok(announcement_error(&e)),
    }
}
