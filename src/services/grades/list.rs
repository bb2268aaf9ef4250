use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{GradeService, resolve_target};
use crate::models::grades::{requests::GradeQuery, responses::GradeListResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::GradeTarget;
use crate::services::{current_caller, default_error_response};

pub async fn list_grades(
    service: &GradeService,
    request: &HttpRequest,
    query: GradeQuery,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request)?;

    let target = match resolve_target(&storage, &caller, query.student_id).await {
        Ok(target) => target,
        Err(e) => return Ok(default_error_response(&e)),
    };

    let result = match target {
        GradeTarget::Student(id) => storage.list_grades(Some(id)).await,
        GradeTarget::Shared => storage.list_grades(None).await,
        GradeTarget::Nothing => Ok(Vec::new()),
        GradeTarget::Denied => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::GradeScopeDenied,
                "You can only view your own grades",
            )));
        }
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeListResponse { items },
            "Grades retrieved successfully",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}
