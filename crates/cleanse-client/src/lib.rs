//! Client for the external tabular processing service.
//!
//! The service receives `{fileName, fileType, data}` and answers with
//! `{success, message?, statistics?, processedData?}`. This crate owns only
//! that contract; the transformation itself happens remotely.

#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod wire;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_TIMEOUT, HealthStatus, ProcessingClient, REDACTED_VALUE,
    ServiceConfig,
};
pub use error::{GENERIC_FAILURE_MESSAGE, Result, TransportError};
pub use wire::{DEFAULT_SERVICE_MESSAGE, ServiceResponse};
