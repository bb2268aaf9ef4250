use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::bulletin::compile;
use super::{GradeService, resolve_target};
use crate::models::grades::{requests::GradeQuery, responses::BulletinResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::GradeTarget;
use crate::services::{current_caller, default_error_response};

/// 科目列表与目标成绩合成成绩单；未认领档案的账号得到空成绩单
pub async fn bulletin(
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

    let student_id = match target {
        GradeTarget::Student(id) => Some(id),
        GradeTarget::Shared => None,
        GradeTarget::Nothing => {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(
                BulletinResponse { items: Vec::new() },
                "No student linked to this account",
            )));
        }
        GradeTarget::Denied => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::GradeScopeDenied,
                "You can only view your own bulletin",
            )));
        }
    };

    let subjects = match storage.list_subjects().await {
        Ok(subjects) => subjects,
        Err(e) => return Ok(default_error_response(&e)),
    };
    let grades = match storage.list_grades(student_id).await {
        Ok(grades) => grades,
        Err(e) => return Ok(default_error_response(&e)),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BulletinResponse {
            items: compile(&subjects, &grades),
        },
        "Bulletin compiled successfully",
    )))
}
