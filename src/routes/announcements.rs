use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::announcements::requests::{
    AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::services::AnnouncementService;
use crate::utils::SafeIDI64;

static ANNOUNCEMENT_SERVICE: Lazy<AnnouncementService> =
    Lazy::new(AnnouncementService::new_lazy);

pub async fn list_announcements(
    req: HttpRequest,
    query: web::Query<AnnouncementListQuery>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.list(&req, query.into_inner()).await
}

pub async fn create_announcement(
    req: HttpRequest,
    body: web::Json<CreateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.create(&req, body.into_inner()).await
}

pub async fn get_announcement(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.get(&req, id.0).await
}

pub async fn update_announcement(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateAnnouncementRequest>,
) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.update(&req, id.0, body.into_inner()).await
}

pub async fn delete_announcement(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.delete(&req, id.0).await
}

pub async fn mark_read(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.mark_read(&req, id.0).await
}

pub async fn mark_all_read(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.mark_all_read(&req).await
}

pub async fn unread_count(req: HttpRequest) -> ActixResult<HttpResponse> {
    ANNOUNCEMENT_SERVICE.unread_count(&req).await
}

pub fn configure_announcement_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/announcements")
            .wrap(middlewares::RequireJWT)
            // 固定路径须在 /{id} 之前注册
            .route("/read-all", web::post().to(mark_all_read))
            .route("/unread/count", web::get().to(unread_count))
            .route("", web::get().to(list_announcements))
            .route("", web::post().to(create_announcement))
            .route("/{id}", web::get().to(get_announcement))
            .route("/{id}", web::put().to(update_announcement))
            .route("/{id}", web::delete().to(delete_announcement))
            .route("/{id}/read", web::post().to(mark_read)),
    );
}
