use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn health(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.health(&request).await
}

// 公开路由，负载均衡与客户端探活使用
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/v1/health").route(web::get().to(health)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppStartTime;
    use actix_web::{App, http::StatusCode, test};

    #[actix_web::test]
    async fn test_health_is_public_and_enveloped() {
        let started = AppStartTime {
            start_datetime: chrono::Utc::now() - chrono::Duration::seconds(90),
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(started))
                .configure(configure_system_routes),
        )
        .await;

        let request = test::TestRequest::get().uri("/api/v1/health").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["ok"], true);
        assert!(body["data"]["uptimeSeconds"].as_i64().unwrap_or_default() >= 90);
    }

    #[actix_web::test]
    async fn test_health_without_start_time() {
        let app = test::init_service(App::new().configure(configure_system_routes)).await;

        let request = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["data"]["ok"], true);
        assert_eq!(body["data"]["uptimeSeconds"], 0);
    }
}
