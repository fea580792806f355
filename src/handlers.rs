use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

use crate::backend::BackendClient;
use crate::demo;
use crate::error::ProxyError;
use crate::models::{ApiInfo, Endpoints};
use crate::upload;

pub const API_VERSION: &str = "2.0.0";

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

/// Registers the `/api/*` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/predict")
            .route(web::post().to(predict))
            .route(web::get().to(api_info)),
    )
    .service(web::resource("/api/health").route(web::get().to(health)))
    .service(web::resource("/api/classes").route(web::get().to(classes)));
}

pub async fn predict(
    payload: Multipart,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ProxyError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);

    async move {
        let image = upload::read_image(payload).await?;
        info!(
            file_name = %image.file_name,
            content_type = %image.content_type,
            bytes = image.len(),
            "accepted upload"
        );

        match state.backend.predict(&image).await {
            Ok(body) => {
                info!(
                    disease = body.get("disease").and_then(|d| d.as_str()).unwrap_or("?"),
                    "returning backend result"
                );
                Ok(HttpResponse::Ok()
                    .insert_header((
                        header::CACHE_CONTROL,
                        "no-cache, no-store, must-revalidate",
                    ))
                    .json(body))
            }
            Err(err) if err.is_timeout() => {
                warn!(error = %err, "backend timed out");
                Err(ProxyError::Timeout)
            }
            Err(err) => {
                warn!(error = %err, "backend unavailable, serving demo result");
                Ok(HttpResponse::Ok().json(demo::random_demo()))
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn api_info(state: web::Data<AppState>) -> HttpResponse {
    let info = ApiInfo {
        message: "Plant Disease Detection API".into(),
        version: API_VERSION.into(),
        features: vec![
            "AI-powered disease detection".into(),
            "Real-time image analysis".into(),
            "Treatment recommendations".into(),
            "Mobile-friendly interface".into(),
        ],
        endpoints: Endpoints {
            predict: "POST /api/predict - Upload image for disease detection".into(),
            health: "GET /api/health - Backend health check".into(),
            classes: "GET /api/classes - Disease classes known to the backend".into(),
        },
        backend_status: format!(
            "Check backend at {}",
            state.backend.config().health_url()
        ),
        supported_formats: vec!["JPEG".into(), "PNG".into(), "WebP".into()],
        max_file_size: "10MB".into(),
    };
    HttpResponse::Ok().json(info)
}

pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.backend.health().await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => {
            warn!(error = %err, "backend health check failed");
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "unavailable",
                "error": err.to_string(),
            }))
        }
    }
}

pub async fn classes(state: web::Data<AppState>) -> HttpResponse {
    match state.backend.classes().await {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => {
            warn!(error = %err, "could not fetch classes from backend");
            HttpResponse::BadGateway().json(json!({ "error": err.to_string() }))
        }
    }
}
