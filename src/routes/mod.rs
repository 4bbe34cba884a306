// Route exports
pub mod predict;

use actix_web::{web, HttpResponse};

use crate::models::ErrorResponse;

pub use predict::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(predict::configure);
}

/// Fallback for paths with no route
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new("Not Found"))
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::new("Method Not Allowed"))
}
