//! The tracking pixel endpoint.
//!
//! This endpoint must never return 4xx/5xx for a structurally valid
//! request: many mail clients disable images or retry aggressively on
//! non-2xx responses, and a visibly broken pixel is worse than a
//! silently ignored unknown id. The open is recorded fire-and-forget;
//! the image bytes go out unconditionally.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tracing::trace;

use crate::analytics::{EventRecorder, HitContext};
use crate::utils::ip::{extract_client_ip, extract_user_agent};

/// Fixed 1x1 transparent PNG, bit-exact across all requests.
pub const TRACKING_PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1f,
    0x15, 0xc4, 0x89, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x44, 0x41, 0x54, 0x78, 0xda, 0x63, 0x64,
    0xf8, 0xcf, 0x50, 0x0f, 0x00, 0x03, 0x86, 0x01, 0x80, 0x5a, 0x34, 0x7d, 0x6b, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

pub struct PixelService {}

impl PixelService {
    /// `GET /pixel/{message_id}` (a trailing `.png` is accepted, the
    /// original embed format). Responds 200 image/png for malformed and
    /// unknown ids alike.
    pub async fn handle_pixel(
        req: HttpRequest,
        path: web::Path<String>,
        recorder: web::Data<Arc<EventRecorder>>,
    ) -> impl Responder {
        let raw = path.into_inner();
        let message_id = raw.strip_suffix(".png").unwrap_or(&raw);

        if !message_id.is_empty() {
            let ctx = HitContext {
                source_ip: extract_client_ip(&req),
                user_agent: extract_user_agent(&req),
            };
            recorder.record_open(message_id, ctx);
        } else {
            trace!("Pixel fetched with empty id, nothing to record");
        }

        HttpResponse::Ok()
            .insert_header(("Content-Type", "image/png"))
            .insert_header((
                "Cache-Control",
                "no-store, no-cache, must-revalidate, proxy-revalidate",
            ))
            .insert_header(("Pragma", "no-cache"))
            .insert_header(("Expires", "0"))
            .body(TRACKING_PIXEL_PNG)
    }
}

/// Pixel route configuration.
pub fn pixel_routes() -> actix_web::Scope {
    web::scope("/pixel")
        .route("/{message_id}", web::get().to(PixelService::handle_pixel))
        .route("/{message_id}", web::head().to(PixelService::handle_pixel))
}
