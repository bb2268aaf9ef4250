use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradeService;
use super::validate::validate_entries;
use crate::errors::ScholarError;
use crate::models::grades::requests::GradeBatchRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::can_record_grades;
use crate::services::{current_caller, error_response};

/// 整批校验通过后在单个事务中写入，成功返回 204
pub async fn record_batch(
    service: &GradeService,
    request: &HttpRequest,
    batch: GradeBatchRequest,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    if !can_record_grades(caller.role) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only staff can record grades",
        )));
    }

    let entries = match validate_entries(&batch.entries) {
        Ok(entries) => entries,
        Err(violation) => {
            let message = format!("Invalid score at {violation}");
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error(
                ErrorCode::GradeScoreInvalid,
                violation,
                message,
            )));
        }
    };

    let storage = service.get_storage(request)?;
    match storage.upsert_grades(batch.student_id, &entries).await {
        Ok(()) => {
            tracing::info!(
                "Account {} recorded {} grade entries for {:?}",
                caller.account_id,
                entries.len(),
                batch.student_id
            );
            Ok(HttpResponse::NoContent().finish())
        }
        Err(e @ ScholarError::NotFound(_)) => Ok(error_response(&e, ErrorCode::StudentNotFound)),
        Err(e) => Ok(error_response(&e, ErrorCode::GradeWriteFailed)),
    }
}
