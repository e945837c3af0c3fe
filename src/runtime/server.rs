//! HTTP server assembly.
//!
//! Route layout: the tracking API under `/tracking`, the public-facing
//! pixel and redirect endpoints at the root, and a liveness probe.
//! CORS is permissive because the extension calls the API from webmail
//! origins.

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Compress, web};
use anyhow::{Context, Result};
use tracing::info;

use crate::api::services::health::health_routes;
use crate::api::services::pixel::pixel_routes;
use crate::api::services::redirect::redirect_routes;
use crate::api::services::tracking::tracking_routes;
use crate::config::get_config;

use super::startup::StartupContext;

pub async fn run_server(ctx: StartupContext) -> Result<()> {
    let config = get_config();
    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let store = ctx.store;
    let recorder = ctx.recorder;

    HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(recorder.clone()))
            .service(health_routes())
            .service(tracking_routes())
            .service(pixel_routes())
            .service(redirect_routes())
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated abnormally")?;

    Ok(())
}
