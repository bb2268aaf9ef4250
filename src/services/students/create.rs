use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::ScholarError;
use crate::models::students::requests::CreateStudentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::policy::can_manage_catalog;
use crate::services::{current_caller, error_response};
use crate::utils::validate::{normalize_email, require_text, validate_email};

fn validate(create: CreateStudentRequest) -> Result<CreateStudentRequest, String> {
    let email = normalize_email(&create.email);
    validate_email(&email).map_err(str::to_string)?;
    Ok(CreateStudentRequest {
        name: require_text("name", &create.name, 1)?,
        email,
        enrollment_code: require_text("enrollmentCode", &create.enrollment_code, 1)?,
        course_name: create.course_name.trim().to_string(),
    })
}

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    create: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    let caller = match current_caller(request) {
        Ok(caller) => caller,
        Err(response) => return Ok(response),
    };
    if !can_manage_catalog(caller.role) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "Only staff can register students",
        )));
    }

    let create = match validate(create) {
        Ok(create) => create,
        Err(msg) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::StudentInvalid, msg)));
        }
    };

    let storage = service.get_storage(request)?;
    match storage.create_student(create).await {
        Ok(student) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(student, "Student created successfully"))),
        Err(e @ ScholarError::Conflict(_)) => {
            Ok(error_response(&e, ErrorCode::StudentEnrollmentCodeExists))
        }
        Err(e) => Ok(error_response(&e, ErrorCode::from_error(&e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, code: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            name: name.to_string(),
            email: email.to_string(),
            enrollment_code: code.to_string(),
            course_name: " Computer Science ".to_string(),
        }
    }

    #[test]
    fn test_validate_trims_and_normalizes() {
        let ok = validate(request(" Ana ", "ANA@School.edu", " 2024001 ")).unwrap();
        assert_eq!(ok.name, "Ana");
        assert_eq!(ok.email, "ana@school.edu");
        assert_eq!(ok.enrollment_code, "2024001");
        assert_eq!(ok.course_name, "Computer Science");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(validate(request("  ", "ana@school.edu", "1")).is_err());
        assert!(validate(request("Ana", "not-an-email", "1")).is_err());
        assert!(validate(request("Ana", "ana@school.edu", " ")).is_err());
    }
}
