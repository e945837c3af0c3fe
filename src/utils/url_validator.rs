//! Validation of original URLs before they are wrapped.
//!
//! Only absolute http/https destinations are accepted; everything the
//! redirect endpoint could be abused with (javascript:, data:, file:)
//! is rejected at creation time.

use url::Url;

#[derive(Debug)]
pub enum UrlValidationError {
    EmptyUrl,
    InvalidProtocol(String),
    DangerousProtocol(String),
    InvalidFormat(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "original_url cannot be empty"),
            Self::InvalidProtocol(proto) => write!(
                f,
                "invalid protocol: {}. Only http:// and https:// are allowed",
                proto
            ),
            Self::DangerousProtocol(proto) => {
                write!(f, "dangerous protocol blocked: {}", proto)
            }
            Self::InvalidFormat(msg) => write!(f, "invalid URL format: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

const DANGEROUS_PROTOCOLS: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// Validate that `url` is a syntactically well-formed absolute http(s) URL.
pub fn validate_original_url(url: &str) -> Result<(), UrlValidationError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(UrlValidationError::EmptyUrl);
    }

    let url_lower = url.to_lowercase();

    for proto in DANGEROUS_PROTOCOLS {
        if url_lower.starts_with(proto) {
            return Err(UrlValidationError::DangerousProtocol(proto.to_string()));
        }
    }

    if !url_lower.starts_with("http://") && !url_lower.starts_with("https://") {
        let proto = url_lower
            .split(':')
            .next()
            .map(|s| format!("{}:", s))
            .unwrap_or_default();
        return Err(UrlValidationError::InvalidProtocol(proto));
    }

    Url::parse(url).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_original_url("https://example.com/a?b=c").is_ok());
        assert!(validate_original_url("http://example.com").is_ok());
        assert!(validate_original_url("  https://example.com  ").is_ok());
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            validate_original_url("   "),
            Err(UrlValidationError::EmptyUrl)
        ));
    }

    #[test]
    fn rejects_dangerous_protocols() {
        assert!(matches!(
            validate_original_url("javascript:alert(1)"),
            Err(UrlValidationError::DangerousProtocol(_))
        ));
        assert!(matches!(
            validate_original_url("data:text/html;base64,xx"),
            Err(UrlValidationError::DangerousProtocol(_))
        ));
    }

    #[test]
    fn rejects_relative_and_other_schemes() {
        assert!(matches!(
            validate_original_url("/relative/path"),
            Err(UrlValidationError::InvalidProtocol(_))
        ));
        assert!(matches!(
            validate_original_url("ftp://example.com"),
            Err(UrlValidationError::InvalidProtocol(_))
        ));
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!(
            validate_original_url("https://"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }
}
