use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CatalogService, deleted_or_missing, invalid};
use crate::models::catalog::{requests::CreateCourseRequest, responses::CourseListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::default_error_response;
use crate::utils::validate::require_text;

pub async fn list_courses(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_courses().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CourseListResponse { items },
            "Courses retrieved successfully",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}

pub async fn create_course(
    service: &CatalogService,
    request: &HttpRequest,
    create: CreateCourseRequest,
) -> ActixResult<HttpResponse> {
    if let Err(response) = service.require_staff(request) {
        return Ok(response);
    }
    let name = match require_text("name", &create.name, 1) {
        Ok(name) => name,
        Err(msg) => return Ok(invalid(msg)),
    };

    let storage = service.get_storage(request)?;
    match storage
        .create_course(CreateCourseRequest {
            name,
            shift: create.shift,
        })
        .await
    {
        Ok(course) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(course, "Course created successfully"))),
        Err(e) => Ok(default_error_response(&e)),
    }
}

pub async fn delete_course(
    service: &CatalogService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(response) = service.require_staff(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request)?;
    match storage.delete_course(id).await {
        Ok(deleted) => Ok(deleted_or_missing(deleted, "Course", ErrorCode::CourseNotFound)),
        Err(e) => Ok(default_error_response(&e)),
    }
}
