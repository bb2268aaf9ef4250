use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::ApiResponse;
use crate::models::students::responses::StudentListResponse;
use crate::policy::{StudentScope, effective_student_scope};
use crate::services::{current_caller, default_error_response};

/// 教务人员看到全部学生，普通账号只看到自己认领的档案
pub async fn list_students(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    let storage = service.get_storage(request)?;

    let result = match effective_student_scope(caller.role) {
        StudentScope::All => storage.list_students().await,
        StudentScope::Own => storage
            .get_student_by_account(caller.account_id)
            .await
            .map(|student| student.into_iter().collect()),
    };

    match result {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            StudentListResponse { items },
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}
