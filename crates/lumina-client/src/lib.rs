//! Generation Service client.
//!
//! This crate provides:
//! - The `GenerationService` trait the studio core is written against
//! - A reqwest-backed implementation speaking the service's HTTP/JSON API
//! - Environment-driven configuration
//! - Request metrics and tracing spans per operation

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod service;


pub use client::GenerationClient;
pub use config::ServiceConfig;
pub use error::{ServiceError, ServiceOperation, ServiceResult};
pub use service::GenerationService;
