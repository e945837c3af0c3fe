//! API request/response types and response helpers.
//!
//! Bodies are flat JSON; errors are `{"error": "<message>"}` so the
//! extension and dashboard can surface them verbatim.

use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::analytics::MessageStats;
use crate::config::get_config;
use crate::errors::MailtraceError;
use crate::storage::MessageSummary;

#[derive(Deserialize, Clone, Debug)]
pub struct CreateMessageRequest {
    pub owner_id: Option<String>,
    pub subject: Option<String>,
    pub recipient: Option<String>,
    /// Pre-minted id from a trusted caller (the extension embeds the
    /// pixel before the create call returns). Server mints when absent.
    pub message_id: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct CreateMessageResponse {
    pub message_id: String,
    pub pixel_url: String,
    /// original URL → wrapped URL, for the links that persisted.
    pub wrapped_links: BTreeMap<String, String>,
    /// Originals that failed validation or persistence. The message
    /// itself and the earlier links are still live (partial success).
    pub failed_links: Vec<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct CreateLinkRequest {
    pub message_id: Option<String>,
    pub original_url: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct CreateLinkResponse {
    pub link_id: String,
    pub tracking_url: String,
}

#[derive(Serialize, Clone, Debug)]
pub struct MessageListResponse {
    pub messages: Vec<MessageSummary>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct RedirectQuery {
    pub redirect: Option<String>,
}

#[derive(Serialize, Clone, Debug)]
pub struct ErrorBody {
    pub error: String,
}

pub fn stats_response(stats: MessageStats) -> HttpResponse {
    HttpResponse::Ok().json(stats)
}

pub fn error_response(err: &MailtraceError) -> HttpResponse {
    HttpResponse::build(err.http_status()).json(ErrorBody {
        error: err.message().to_string(),
    })
}

/// Base URL for the tracking artifacts embedded in outgoing mail.
///
/// `PUBLIC_BASE_URL` wins when configured; otherwise the request's own
/// connection info is used, which matches the original deployment where
/// the service sat directly behind its public hostname.
pub fn base_url(req: &HttpRequest) -> String {
    let config = get_config();
    if let Some(ref base) = config.tracking.public_base_url {
        return base.clone();
    }
    let conn = req.connection_info();
    format!("{}://{}", conn.scheme(), conn.host())
}

pub fn pixel_url(base: &str, message_id: &str) -> String {
    format!("{}/pixel/{}.png", base, message_id)
}

/// Wrapped link with the destination embedded as a query parameter so
/// click tracking degrades gracefully when the lookup store is down.
pub fn wrapped_link_url(base: &str, link_id: &str, original_url: &str) -> String {
    format!(
        "{}/redirect/{}?redirect={}",
        base,
        link_id,
        urlencoding::encode(original_url)
    )
}
