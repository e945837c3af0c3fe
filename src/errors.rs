use std::fmt;

use actix_web::http::StatusCode;

#[derive(Debug, Clone)]
pub enum MailtraceError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    QueryTimeout(String),
}

impl MailtraceError {
    pub fn code(&self) -> &'static str {
        match self {
            MailtraceError::DatabaseConfig(_) => "E001",
            MailtraceError::DatabaseConnection(_) => "E002",
            MailtraceError::DatabaseOperation(_) => "E003",
            MailtraceError::Validation(_) => "E004",
            MailtraceError::NotFound(_) => "E005",
            MailtraceError::Serialization(_) => "E006",
            MailtraceError::QueryTimeout(_) => "E007",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            MailtraceError::DatabaseConfig(_) => "Database Configuration Error",
            MailtraceError::DatabaseConnection(_) => "Database Connection Error",
            MailtraceError::DatabaseOperation(_) => "Database Operation Error",
            MailtraceError::Validation(_) => "Validation Error",
            MailtraceError::NotFound(_) => "Resource Not Found",
            MailtraceError::Serialization(_) => "Serialization Error",
            MailtraceError::QueryTimeout(_) => "Query Timeout",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            MailtraceError::DatabaseConfig(msg) => msg,
            MailtraceError::DatabaseConnection(msg) => msg,
            MailtraceError::DatabaseOperation(msg) => msg,
            MailtraceError::Validation(msg) => msg,
            MailtraceError::NotFound(msg) => msg,
            MailtraceError::Serialization(msg) => msg,
            MailtraceError::QueryTimeout(msg) => msg,
        }
    }

    /// HTTP status the API layer maps this error to. Validation failures
    /// are the caller's fault; everything else on the read path is a 500.
    pub fn http_status(&self) -> StatusCode {
        match self {
            MailtraceError::Validation(_) => StatusCode::BAD_REQUEST,
            MailtraceError::NotFound(_) => StatusCode::NOT_FOUND,
            MailtraceError::DatabaseConfig(_)
            | MailtraceError::DatabaseConnection(_)
            | MailtraceError::DatabaseOperation(_)
            | MailtraceError::Serialization(_)
            | MailtraceError::QueryTimeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for MailtraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type(), self.message())
    }
}

impl std::error::Error for MailtraceError {}

impl MailtraceError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        MailtraceError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        MailtraceError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        MailtraceError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        MailtraceError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        MailtraceError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        MailtraceError::Serialization(msg.into())
    }

    pub fn query_timeout<T: Into<String>>(msg: T) -> Self {
        MailtraceError::QueryTimeout(msg.into())
    }
}

impl From<sea_orm::DbErr> for MailtraceError {
    fn from(err: sea_orm::DbErr) -> Self {
        MailtraceError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for MailtraceError {
    fn from(err: serde_json::Error) -> Self {
        MailtraceError::Serialization(err.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for MailtraceError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        MailtraceError::QueryTimeout("aggregation query exceeded time budget".to_string())
    }
}

pub type Result<T> = std::result::Result<T, MailtraceError>;
