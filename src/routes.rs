use actix_web::{web, HttpResponse};

use crate::errors::ApiError;
use crate::status_feed::StatusFetcher;

// Embed static files at compile time
const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");
const STYLES_CSS: &str = include_str!("../static/styles.css");

// ============================================================================
// Frontend Routes
// ============================================================================

async fn serve_index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

async fn serve_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(APP_JS)
}

async fn serve_css() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/css; charset=utf-8")
        .body(STYLES_CSS)
}

// ============================================================================
// API Endpoints
// ============================================================================

#[tracing::instrument(skip(fetcher), level = "info")]
async fn get_status(fetcher: web::Data<StatusFetcher>) -> Result<HttpResponse, ApiError> {
    let report = fetcher.load_status().await?;
    Ok(HttpResponse::Ok().json(report))
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(serve_index))
        .route("/app.js", web::get().to(serve_js))
        .route("/styles.css", web::get().to(serve_css))
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api").route("/status", web::get().to(get_status)))
        // Anything else gets the page shell
        .default_service(web::to(serve_index));
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use super::*;
    use crate::settings::{environment_from, Settings};
    use crate::test_support::{spawn_stub, write_corrupt_sample};

    fn fetcher(url: &str, sample: &str) -> StatusFetcher {
        let settings = Settings::from_environment(environment_from(&[
            ("MTA_SERVICE_STATUS_URL", url),
            ("SAMPLE_STATUS_PATH", sample),
        ]))
        .unwrap();
        StatusFetcher::new(&settings).unwrap()
    }

    #[actix_web::test]
    async fn status_serves_sample_when_upstream_fails() {
        let url = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, "");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fetcher(&url, "data/sample-service-status.xml")))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/status").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["source"], "sample");
        assert!(body["lines"].as_array().is_some_and(|lines| !lines.is_empty()));
    }

    #[actix_web::test]
    async fn status_is_500_when_both_sources_fail() {
        let url = spawn_stub(StatusCode::NOT_FOUND, "");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fetcher(&url, "data/nope.xml")))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/status").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Unable to load subway status right now." }));
    }

    #[actix_web::test]
    async fn status_is_500_when_sample_is_corrupt() {
        let sample = write_corrupt_sample("routes");
        let url = spawn_stub(StatusCode::BAD_GATEWAY, "");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(fetcher(&url, sample.to_str().unwrap())))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/status").to_request();
        let resp = test::call_service(&app, req).await;
        let _ = std::fs::remove_file(&sample);
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Unable to load subway status right now." }));
    }

    #[actix_web::test]
    async fn health_reports_ok() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[actix_web::test]
    async fn unknown_routes_get_the_page_shell() {
        let app = test::init_service(App::new().configure(configure)).await;

        for uri in ["/", "/lines/a-c-e"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);

            let body = test::read_body(resp).await;
            let html = std::str::from_utf8(&body).unwrap();
            assert!(html.contains("status-grid"));
            assert!(html.contains("/app.js"));
        }
    }

    #[actix_web::test]
    async fn assets_have_content_types() {
        let app = test::init_service(App::new().configure(configure)).await;

        for (uri, content_type) in [
            ("/app.js", "application/javascript; charset=utf-8"),
            ("/styles.css", "text/css; charset=utf-8"),
        ] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert_eq!(resp.headers().get("content-type").unwrap(), content_type);
        }
    }
}
