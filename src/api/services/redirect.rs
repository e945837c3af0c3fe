//! The click-tracking redirect endpoint.
//!
//! Dual-path resolution: a wrapped link carries its destination in the
//! `redirect` query parameter (generated by this system when the link
//! was wrapped), so the redirect still works when the lookup store is
//! briefly unavailable. Without the parameter the destination comes
//! from the tracked-link row, and an unknown id is a 404.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::{debug, error};

use crate::analytics::{EventRecorder, HitContext};
use crate::api::types::RedirectQuery;
use crate::storage::TrackingStore;
use crate::utils::ip::{extract_client_ip, extract_user_agent};

pub struct RedirectService {}

impl RedirectService {
    /// `GET /redirect/{link_id}?redirect={url}`
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        query: web::Query<RedirectQuery>,
        store: web::Data<Arc<TrackingStore>>,
        recorder: web::Data<Arc<EventRecorder>>,
    ) -> impl Responder {
        let link_id = path.into_inner();
        let ctx = HitContext {
            source_ip: extract_client_ip(&req),
            user_agent: extract_user_agent(&req),
        };

        // Self-contained path: the destination travels inside the URL,
        // trusted because this system generated it at wrap time. The
        // click is recorded even when the link row does not exist.
        if let Some(target) = query
            .into_inner()
            .redirect
            .filter(|url| !url.trim().is_empty())
        {
            recorder.record_click(&link_id, ctx);
            return Self::found_response(&target);
        }

        match store.get_link(&link_id).await {
            Ok(Some(link)) => {
                recorder.record_click(&link_id, ctx);
                Self::found_response(&link.original_url)
            }
            Ok(None) => {
                debug!("Redirect link not found: {}", link_id);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Database error during redirect lookup: {}", e);
                HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
                    .insert_header(("Content-Type", "text/html; charset=utf-8"))
                    .body("Internal Server Error")
            }
        }
    }

    fn found_response(target: &str) -> HttpResponse {
        HttpResponse::build(StatusCode::FOUND)
            .insert_header(("Location", target))
            .finish()
    }

    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/html; charset=utf-8"))
            .body("Link not found")
    }
}

/// Redirect route configuration.
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("/redirect")
        .route("/{link_id}", web::get().to(RedirectService::handle_redirect))
        .route(
            "/{link_id}",
            web::head().to(RedirectService::handle_redirect),
        )
}
