//! 课程、教师与科目的维护
//!
//! 列表对所有已认证账号开放，创建与删除需要教务角色。

pub mod courses;
pub mod subjects;
pub mod teachers;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::accounts::entities::Caller;
use crate::models::catalog::requests::{
    CreateCourseRequest, CreateSubjectRequest, CreateTeacherRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::can_manage_catalog;
use crate::storage::Storage;

pub struct CatalogService {
    storage: Option<Arc<dyn Storage>>,
}

impl CatalogService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub(crate) fn require_staff(&self, request: &HttpRequest) -> Result<Caller, HttpResponse> {
        let caller = super::current_caller(request)?;
        if can_manage_catalog(caller.role) {
            Ok(caller)
        } else {
            Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "Only staff can modify the catalog",
            )))
        }
    }

    pub async fn list_courses(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        courses::list_courses(self, request).await
    }

    pub async fn create_course(
        &self,
        request: &HttpRequest,
        create: CreateCourseRequest,
    ) -> ActixResult<HttpResponse> {
        courses::create_course(self, request, create).await
    }

    pub async fn delete_course(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        courses::delete_course(self, request, id).await
    }

    pub async fn list_teachers(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teachers::list_teachers(self, request).await
    }

    pub async fn create_teacher(
        &self,
        request: &HttpRequest,
        create: CreateTeacherRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::create_teacher(self, request, create).await
    }

    pub async fn delete_teacher(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        teachers::delete_teacher(self, request, id).await
    }

    pub async fn list_subjects(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        subjects::list_subjects(self, request).await
    }

    pub async fn create_subject(
        &self,
        request: &HttpRequest,
        create: CreateSubjectRequest,
    ) -> ActixResult<HttpResponse> {
        subjects::create_subject(self, request, create).await
    }

    pub async fn delete_subject(&self, request: &HttpRequest, id: i64) -> ActixResult<HttpResponse> {
        subjects::delete_subject(self, request, id).await
    }
}

fn invalid(msg: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::CatalogInvalid, msg))
}

fn deleted_or_missing(deleted: bool, what: &str, missing: ErrorCode) -> HttpResponse {
    if deleted {
        HttpResponse::Ok().json(ApiResponse::success_empty(format!("{what} deleted successfully")))
    } else {
        HttpResponse::NotFound().json(ApiResponse::error_empty(missing, format!("{what} not found")))
    }
}
