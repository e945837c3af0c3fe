//! Liveness endpoint for deploy probes.

use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

pub struct HealthService {}

impl HealthService {
    pub async fn health_check() -> impl Responder {
        HttpResponse::Ok().json(HealthStatus {
            status: "ok",
            service: "mailtrace",
            version: env!("CARGO_PKG_VERSION"),
        })
    }
}

pub fn health_routes() -> actix_web::Scope {
    web::scope("/health")
        .route("", web::get().to(HealthService::health_check))
        .route("", web::head().to(HealthService::health_check))
}
