use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AnnouncementService, announcement_error};
use crate::models::ApiResponse;
use crate::models::announcements::entities::AnnouncementView;
use crate::models::announcements::{
    requests::AnnouncementListQuery, responses::AnnouncementListResponse,
};
use crate::services::current_caller;

/// `unreadOnly` 在已读标注之后过滤，分类由存储层过滤
pub(crate) fn apply_unread_filter(items: Vec<AnnouncementView>, unread_only: bool) -> Vec<AnnouncementView> {
    if unread_only {
        items.into_iter().filter(|view| !view.read).collect()
    } else {
        items
    }
}

pub async fn list_announcements(
    service: &AnnouncementService,
    request: &HttpRequest,
    query: AnnouncementListQuery,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request)?;
    match storage
        .list_announcements(caller.account_id, query.category)
        .await
    {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AnnouncementListResponse {
                items: apply_unread_filter(items, query.unread_only),
            },
            "Announcements retrieved successfully",
        ))),
        Err(e) => Ok(announcement_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::accounts::entities::AccountRole;
    use crate::models::announcements::entities::{
        AnnouncementCategory, AnnouncementPriority, AuthorSummary,
    };

    fn view(id: i64, read: bool) -> AnnouncementView {
        AnnouncementView {
            id,
            title: format!("Title {id}"),
            body: "Some body text".to_string(),
            category: AnnouncementCategory::Notice,
            priority: AnnouncementPriority::Normal,
            published_at: chrono::Utc::now(),
            author: AuthorSummary {
                id: 1,
                name: "Staff".to_string(),
                email: "staff@school.edu".to_string(),
                role: AccountRole::Manager,
            },
            read,
            read_at: read.then(chrono::Utc::now),
        }
    }

    #[test]
    fn test_unread_filter_keeps_order() {
        let items = vec![view(3, false), view(2, true), view(1, false)];
        let ids: Vec<i64> = apply_unread_filter(items.clone(), true)
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(apply_unread_filter(items, false).len(), 3);
    }
}
