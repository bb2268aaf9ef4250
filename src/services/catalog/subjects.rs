use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CatalogService, deleted_or_missing, invalid};
use crate::errors::ScholarError;
use crate::models::catalog::{requests::CreateSubjectRequest, responses::SubjectListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{default_error_response, error_response};
use crate::utils::validate::require_text;

pub const MIN_CREDIT_HOURS: i32 = 1;
pub const MAX_CREDIT_HOURS: i32 = 999;

fn validate(create: CreateSubjectRequest) -> Result<CreateSubjectRequest, String> {
    let name = require_text("name", &create.name, 1)?;
    if !(MIN_CREDIT_HOURS..=MAX_CREDIT_HOURS).contains(&create.credit_hours) {
        return Err(format!(
            "creditHours must be between {MIN_CREDIT_HOURS} and {MAX_CREDIT_HOURS}"
        ));
    }
    Ok(CreateSubjectRequest { name, ..create })
}

/// 按创建顺序返回，成绩单沿用此顺序
pub async fn list_subjects(
    service: &CatalogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    match storage.list_subjects().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SubjectListResponse { items },
            "Subjects retrieved successfully",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}

pub async fn create_subject(
    service: &CatalogService,
    request: &HttpRequest,
    create: CreateSubjectRequest,
) -> ActixResult<HttpResponse> {
    if let Err(response) = service.require_staff(request) {
        return Ok(response);
    }
    let create = match validate(create) {
        Ok(create) => create,
        Err(msg) => return Ok(invalid(msg)),
    };

    let storage = service.get_storage(request)?;
    match storage.create_subject(create).await {
        Ok(subject) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(subject, "Subject created successfully"))),
        // 引用的课程或教师不存在
        Err(e @ ScholarError::NotFound(_)) => Ok(error_response(&e, ErrorCode::CatalogInvalid)),
        Err(e) => Ok(default_error_response(&e)),
    }
}

/// 删除科目不会删除已有成绩，成绩单会忽略这些孤立成绩
pub async fn delete_subject(
    service: &CatalogService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    if let Err(response) = service.require_staff(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request)?;
    match storage.delete_subject(id).await {
        Ok(deleted) => Ok(deleted_or_missing(deleted, "Subject", ErrorCode::SubjectNotFound)),
        Err(e) => Ok(default_error_response(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, credit_hours: i32) -> CreateSubjectRequest {
        CreateSubjectRequest {
            name: name.to_string(),
            credit_hours,
            course_id: Some(1),
            teacher_id: None,
        }
    }

    #[test]
    fn test_credit_hours_bounds() {
        assert!(validate(request("Algebra", 1)).is_ok());
        assert!(validate(request("Algebra", 999)).is_ok());
        assert!(validate(request("Algebra", 0)).is_err());
        assert!(validate(request("Algebra", 1000)).is_err());
    }

    #[test]
    fn test_name_is_trimmed_and_required() {
        let ok = validate(request("  Physics ", 60)).unwrap();
        assert_eq!(ok.name, "Physics");
        assert_eq!(ok.course_id, Some(1));
        assert!(validate(request("   ", 60)).is_err());
    }
}
