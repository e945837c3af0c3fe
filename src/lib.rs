//! Mailtrace - email open/click tracking backend
//!
//! This library provides the core functionality for the Mailtrace
//! service: tracking-identifier minting, the record store, fire-and-forget
//! event recording, the pixel/redirect HTTP endpoints, and query-time
//! aggregation.
//!
//! # Architecture
//! - `storage`: sea-orm record store and raw event inserts
//! - `analytics`: event recorder and stats engine
//! - `api`: HTTP services and request/response types
//! - `config`: environment-driven configuration
//! - `runtime`: startup context and server assembly
//! - `system`: logging initialization
//! - `utils`: client-IP extraction, URL validation

pub mod analytics;
pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod storage;
pub mod system;
pub mod utils;
