use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::{ensure_json, parse_body, Predictor};
use crate::error::PredictionError;
use crate::models::{HealthResponse, PredictionResponse, Tier, TierHealth};
use crate::services::ModelRegistry;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
    pub predictor: Predictor,
}

/// Configure prediction and health routes
///
/// Each resource answers other methods with 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/predict-simple")
            .route(web::post().to(predict_simple))
            .default_service(web::to(super::method_not_allowed)),
    )
    .service(
        web::resource("/predict-enhanced")
            .route(web::post().to(predict_enhanced))
            .default_service(web::to(super::method_not_allowed)),
    )
    .service(
        web::resource("/health")
            .route(web::get().to(health_check))
            .default_service(web::to(super::method_not_allowed)),
    );
}

/// Health check endpoint
///
/// Always 200; `degraded` when either model failed to load, with the
/// load error under that tier's `reason`.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let tiers: BTreeMap<String, TierHealth> = Tier::ALL
        .iter()
        .map(|tier| {
            let health = TierHealth {
                available: state.registry.is_available(*tier),
                reason: state.registry.unavailable_reason(*tier).map(str::to_string),
            };
            (tier.to_string(), health)
        })
        .collect();

    let status = if state.registry.all_available() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        tiers,
    })
}

/// Simple prediction endpoint
///
/// POST /predict-simple
///
/// Request body maps each of the 23 general-public columns to a value:
/// ```json
/// {
///   " Age (yrs)": 28,
///   "BMI": 24.1,
///   "Blood Group": 15,
///   "Pimples(Y/N)": 1
/// }
/// ```
async fn predict_simple(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, PredictionError> {
    predict(Tier::Simple, &state, &req, &body)
}

/// Enhanced prediction endpoint
///
/// POST /predict-enhanced
///
/// Same shape as `/predict-simple` against the 31 scan columns.
async fn predict_enhanced(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, PredictionError> {
    predict(Tier::Enhanced, &state, &req, &body)
}

fn predict(
    tier: Tier,
    state: &AppState,
    req: &HttpRequest,
    body: &[u8],
) -> Result<HttpResponse, PredictionError> {
    let span = tracing::info_span!("predict", tier = %tier, request_id = %uuid::Uuid::new_v4());

    span.in_scope(|| -> Result<HttpResponse, PredictionError> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());
        ensure_json(content_type).map_err(|e| {
            tracing::info!("Rejected {} body on {}", content_type.unwrap_or("untyped"), req.path());
            e
        })?;

        let request = parse_body(body)?;
        tracing::debug!("Received data: {}", String::from_utf8_lossy(body));

        let classifier = state.registry.classifier(tier);
        let result = state.predictor.predict(tier, &request, classifier)?;

        tracing::info!("Returning {} prediction (label {})", tier, result.label.as_u8());

        Ok(HttpResponse::Ok().json(PredictionResponse {
            prediction: result.message.to_string(),
        }))
    })
}
