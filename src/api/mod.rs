//! Provider templates API.
//!
//! This module contains the blocking HTTP client for the provider's
//! template endpoints and the wire types exchanged with them.

pub mod client;
pub mod types;

pub use client::TemplatesApi;
pub use types::{RemoteTemplate, TemplatePayload};
