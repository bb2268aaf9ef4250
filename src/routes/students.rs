use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::students::requests::{ClaimStudentRequest, CreateStudentRequest};
use crate::services::StudentService;
use crate::utils::SafeIDI64;

static STUDENT_SERVICE: Lazy<StudentService> = Lazy::new(StudentService::new_lazy);

pub async fn list_students(req: HttpRequest) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.list_students(&req).await
}

pub async fn create_student(
    req: HttpRequest,
    body: web::Json<CreateStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.create_student(&req, body.into_inner()).await
}

pub async fn delete_student(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.delete_student(&req, id.0).await
}

pub async fn claim_student(
    req: HttpRequest,
    body: web::Json<ClaimStudentRequest>,
) -> ActixResult<HttpResponse> {
    STUDENT_SERVICE.claim_student(&req, body.into_inner()).await
}

pub fn configure_student_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/claim")
                    .wrap(RateLimit::claim_student())
                    .route(web::post().to(claim_student)),
            )
            .route("", web::get().to(list_students))
            .route("", web::post().to(create_student))
            .route("/{id}", web::delete().to(delete_student)),
    );
}
