use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::can_manage_catalog;
use crate::services::{current_caller, default_error_response};

/// 删除学生档案，其成绩随之级联删除
pub async fn delete_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    if !can_manage_catalog(caller.role) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only staff can delete students",
        )));
    }

    let storage = service.get_storage(request)?;
    match storage.delete_student(student_id).await {
        Ok(true) => {
            tracing::info!("Student {} deleted by account {}", student_id, caller.account_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::StudentNotFound,
            "Student not found",
        ))),
        Err(e) => Ok(default_error_response(&e)),
    }
}
