//! Tracking record API: message/link creation and the dashboard reads.
//!
//! Unlike the pixel/redirect pair these endpoints surface real errors;
//! a human is present to retry. The read/aggregation handlers run under
//! a request-level timeout and return 500 on exceeding it.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{HttpRequest, HttpResponse, Responder, web};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::analytics::stats;
use crate::api::types::{
    CreateLinkRequest, CreateLinkResponse, CreateMessageRequest, CreateMessageResponse,
    MessageListResponse, base_url, error_response, pixel_url, stats_response, wrapped_link_url,
};
use crate::config::get_config;
use crate::errors::{MailtraceError, Result};
use crate::storage::TrackingStore;

pub struct TrackingService {}

impl TrackingService {
    /// `POST /tracking/messages`
    ///
    /// Creates the parent message, then issues independent link-creation
    /// calls for each provided URL. A link failure does not fail the
    /// whole creation: already-persisted links are returned wrapped and
    /// the rest are listed in `failed_links`.
    pub async fn post_message(
        req: HttpRequest,
        body: web::Json<CreateMessageRequest>,
        store: web::Data<Arc<TrackingStore>>,
    ) -> impl Responder {
        let body = body.into_inner();

        let owner_id = match body.owner_id.as_deref().map(str::trim) {
            Some(owner) if !owner.is_empty() => owner,
            _ => {
                return error_response(&MailtraceError::validation("owner_id is required"));
            }
        };

        let message = match store
            .create_message(
                owner_id,
                body.subject.as_deref(),
                body.recipient.as_deref(),
                body.message_id.as_deref(),
            )
            .await
        {
            Ok(message) => message,
            Err(e) => return error_response(&e),
        };

        let base = base_url(&req);
        let mut wrapped_links = BTreeMap::new();
        let mut failed_links = Vec::new();

        for original in &body.links {
            match store.create_link(&message.id, original).await {
                Ok(link) => {
                    wrapped_links.insert(
                        original.clone(),
                        wrapped_link_url(&base, &link.id, &link.original_url),
                    );
                }
                Err(e) => {
                    warn!("Link creation failed for {}: {}", original, e);
                    failed_links.push(original.clone());
                }
            }
        }

        info!(
            "Message {} created with {} links ({} failed)",
            message.id,
            wrapped_links.len(),
            failed_links.len()
        );

        HttpResponse::Ok().json(CreateMessageResponse {
            pixel_url: pixel_url(&base, &message.id),
            message_id: message.id,
            wrapped_links,
            failed_links,
        })
    }

    /// `POST /tracking/links` — wrap one more URL under an existing
    /// message id (the extension calls this when it finds links after
    /// the message was already registered).
    pub async fn post_link(
        req: HttpRequest,
        body: web::Json<CreateLinkRequest>,
        store: web::Data<Arc<TrackingStore>>,
    ) -> impl Responder {
        let body = body.into_inner();
        let message_id = body.message_id.unwrap_or_default();
        let original_url = body.original_url.unwrap_or_default();

        match store.create_link(&message_id, &original_url).await {
            Ok(link) => {
                let base = base_url(&req);
                HttpResponse::Ok().json(CreateLinkResponse {
                    tracking_url: wrapped_link_url(&base, &link.id, &link.original_url),
                    link_id: link.id,
                })
            }
            Err(e) => error_response(&e),
        }
    }

    /// `GET /tracking/messages/{owner_id}` — owner listing with
    /// query-time aggregates, newest first.
    pub async fn get_messages_for_owner(
        path: web::Path<String>,
        store: web::Data<Arc<TrackingStore>>,
    ) -> impl Responder {
        let owner_id = path.into_inner();

        match Self::with_stats_timeout(stats::owner_summaries(&store, &owner_id)).await {
            Ok(messages) => HttpResponse::Ok().json(MessageListResponse { messages }),
            Err(e) => error_response(&e),
        }
    }

    /// `GET /tracking/messages/{message_id}/stats`
    pub async fn get_message_stats(
        path: web::Path<String>,
        store: web::Data<Arc<TrackingStore>>,
    ) -> impl Responder {
        let message_id = path.into_inner();

        match Self::with_stats_timeout(stats::message_stats(&store, &message_id)).await {
            Ok(stats) => stats_response(stats),
            Err(e) => error_response(&e),
        }
    }

    async fn with_stats_timeout<T>(fut: impl Future<Output = Result<T>>) -> Result<T> {
        let budget = Duration::from_secs(get_config().tracking.stats_timeout_secs);
        timeout(budget, fut).await?
    }
}

/// Tracking API route configuration.
pub fn tracking_routes() -> actix_web::Scope {
    web::scope("/tracking")
        .route("/messages", web::post().to(TrackingService::post_message))
        .route("/links", web::post().to(TrackingService::post_link))
        .route(
            "/messages/{owner_id}",
            web::get().to(TrackingService::get_messages_for_owner),
        )
        .route(
            "/messages/{message_id}/stats",
            web::get().to(TrackingService::get_message_stats),
        )
}
