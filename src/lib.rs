//! An HTTP greeting service built with axum.
//!
//! Exposes a root greeting endpoint and a personalized greeting endpoint,
//! plus generated API documentation.

pub mod feature;
pub mod infra;
pub mod server;
