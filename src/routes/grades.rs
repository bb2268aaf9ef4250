use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::grades::requests::{GradeBatchRequest, GradeQuery};
use crate::services::GradeService;

static GRADE_SERVICE: Lazy<GradeService> = Lazy::new(GradeService::new_lazy);

pub async fn list_grades(
    req: HttpRequest,
    query: web::Query<GradeQuery>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.list_grades(&req, query.into_inner()).await
}

pub async fn record_batch(
    req: HttpRequest,
    body: web::Json<GradeBatchRequest>,
) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.record_batch(&req, body.into_inner()).await
}

pub async fn bulletin(req: HttpRequest, query: web::Query<GradeQuery>) -> ActixResult<HttpResponse> {
    GRADE_SERVICE.bulletin(&req, query.into_inner()).await
}

pub fn configure_grade_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/grades")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/batch")
                    .wrap(RateLimit::grade_batch())
                    .route(web::post().to(record_batch)),
            )
            .route("", web::get().to(list_grades)),
    )
    .service(
        web::scope("/api/v1/bulletin")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(bulletin)),
    );
}
