//! 公告与已读回执
//!
//! 发布需要教务角色；修改与删除由作者（仍具备发布权限时）或管理员执行，
//! 权限在存储事务内判定。每条公告都附带调用者自己的已读状态。

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod reads;
pub mod update;
pub mod validate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::ScholarError;
use crate::models::ErrorCode;
use crate::models::announcements::requests::{
    AnnouncementListQuery, CreateAnnouncementRequest, UpdateAnnouncementRequest,
};
use crate::storage::Storage;

pub struct AnnouncementService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnnouncementService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn create(
        &self,
        request: &HttpRequest,
        create: CreateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_announcement(self, request, create).await
    }

    pub async fn update(
        &self,
        request: &HttpRequest,
        id: i64,
        update: UpdateAnnouncementRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_announcement(self, request, id, update).await
    }

    pub async fn delete(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        delete::delete_announcement(self, request, id).await
    }

    pub async fn get(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        get::get_announcement(self, request, id).await
    }

    pub async fn list(
        &self,
        request: &HttpRequest,
        query: AnnouncementListQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_announcements(self, request, query).await
    }

    pub async fn mark_read(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        reads::mark_read(self, request, id).await
    }

    pub async fn mark_all_read(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        reads::mark_all_read(self, request).await
    }

    pub async fn unread_count(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        reads::unread_count(self, request).await
    }
}

/// 公告相关错误的业务码
pub(crate) fn announcement_error(err: &ScholarError) -> HttpResponse {
    let code = match err {
        ScholarError::NotFound(_) => ErrorCode::AnnouncementNotFound,
        ScholarError::Authorization(_) => ErrorCode::AnnouncementPermissionDenied,
        ScholarError::Validation(_) => ErrorCode::AnnouncementInvalid,
        other => ErrorCode::from_error(other),
    };
    super::error_response(err, code)
}
