use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::ScholarError;
use crate::models::students::requests::ClaimStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{current_caller, default_error_response, error_response};

/// 账号通过学号认领学生档案，一个档案只能被认领一次
pub async fn claim_student(
    service: &StudentService,
    request: &HttpRequest,
    claim: ClaimStudentRequest,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };

    let code = claim.enrollment_code.trim();
    if code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::StudentInvalid,
            "enrollmentCode must not be empty",
        )));
    }

    let storage = service.get_storage(request)?;

    // 先区分「账号已认领」，存储层再兜底处理并发认领
    match storage.get_student_by_account(caller.account_id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AccountAlreadyLinked,
                "This account is already linked to a student",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(default_error_response(&e)),
    }

    match storage.claim_student(caller.account_id, code).await {
        Ok(student) => {
            tracing::info!("Account {} claimed student {}", caller.account_id, student.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(student, "Student linked successfully")))
        }
        Err(e @ ScholarError::NotFound(_)) => Ok(error_response(&e, ErrorCode::StudentNotFound)),
        Err(e @ ScholarError::Conflict(_)) => Ok(error_response(&e, ErrorCode::StudentAlreadyLinked)),
        Err(e) => Ok(default_error_response(&e)),
    }
}
