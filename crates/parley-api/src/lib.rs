//! # parley-api
//!
//! Typed bindings for the Parley backend REST API.
//!
//! One [`ApiClient`] method per endpoint. Every request carries the bearer
//! token held in the shared [`Session`]; failures come back as [`ApiError`]
//! without retries.

pub mod client;
pub mod endpoints;
pub mod session;

mod error;

pub use client::{ApiClient, ApiConfig};
pub use error::{ApiError, Result};
pub use reqwest::Method;
pub use session::{Session, SessionState};
