use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CatalogService, deleted_or_missing, invalid};
use crate::models::catalog::{requests::CreateTeacherRequest, responses::TeacherListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::default_error_response;
use crate::utils::validate::require_text;

pub async fn list_teachers(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_teachers().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherListResponse { items },
            "Teachers retrieved successfully",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}

pub async fn create_teacher(
    service: &CatalogService,
    request: &HttpRequest,
    create: CreateTeacherRequest,
) -> ActixResult<HttpResponse> {
    if let Err(response) = service.require_staff(request) {
        return Ok(response);
    }
    let name = match require_text("name", &create.name, 1) {
        Ok(name) => name,
        Err(msg) => return Ok(invalid(msg)),
    };

    let storage = service.get_storage(request)?;
    let create = CreateTeacherRequest {
        name,
        title: create.title.trim().to_string(),
        teaching_time: create.teaching_time.trim().to_string(),
    };
    match storage.create_teacher(create).await {
        Ok(teacher) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(teacher, "Teacher created successfully"))),
        Err(e) => Ok(default_error_response(&e)),
    }
}

pub async fn delete_teacher(
    service: &CatalogService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(response) = service.require_staff(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request)?;
    match storage.delete_teacher(id).await {
        Ok(deleted) => Ok(deleted_or_missing(deleted, "Teacher", ErrorCode::TeacherNotFound)),
        Err(e) => Ok(default_error_response(&e)),
    }
}
