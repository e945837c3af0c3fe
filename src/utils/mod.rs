pub mod ip;
pub mod url_validator;

pub use ip::extract_client_ip;
