use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, announcement_error};
use crate::models::ApiResponse;
use crate::services::current_caller;

/// 删除公告，已读回执随之删除
pub async fn delete_announcement(
    service: &AnnouncementService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request)?;
    match storage.delete_announcement(&caller, id).await {
        Ok(()) => {
            tracing::info!("Announcement {} deleted by {}", id, caller.account_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Announcement deleted successfully")))
        }
        Err(e) => Ok(announcement_error(&e)),
    }
}
