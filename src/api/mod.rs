//! Typed client for the edge-configuration REST API.
//!
//! Request bodies are form-encoded and replies are JSON. The API is not
//! consistent about scalar types, so [`de`] holds lenient deserializers used
//! by every model.

pub mod client;
pub mod de;
pub mod logging;
pub mod models;

pub use client::Client;
