//! Client IP extraction.
//!
//! Mail clients and image proxies usually reach the pixel endpoint via a
//! reverse proxy, so the forwarded headers are consulted first and the
//! socket peer address is the fallback. The value is advisory metadata
//! on an event row, never an access-control input.

use actix_web::HttpRequest;

/// Best-effort client IP for event metadata.
///
/// Order: first entry of `X-Forwarded-For`, then `X-Real-IP`, then the
/// connection peer address. Returns `None` when nothing is available
/// (e.g. in-process test requests without peer info).
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        let first = forwarded.split(',').next().map(str::trim).unwrap_or("");
        if !first.is_empty() {
            return Some(first.to_string());
        }
    }

    if let Some(real_ip) = req
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        return Some(real_ip.to_string());
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}

/// User-Agent header as an owned string, if present and valid UTF-8.
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .map(String::from)
}
