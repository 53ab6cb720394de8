//! Mailsync - push local HTML email templates to a transactional email provider.
//!
//! Mailsync reads a directory of template body files, compares them against
//! the provider's existing template directory, and creates or updates each
//! one through the provider's HTTP API. Per-template metadata (sender,
//! subject, labels) can be overridden through an optional `_mappings.yml`
//! file next to the templates.
//!
//! # Modules
//!
//! - [`api`] - Blocking HTTP client for the provider's templates API
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`events`] - Structured sync event output
//! - [`mappings`] - Override mapping file parsing
//! - [`sync`] - Local-to-remote synchronization
//!
//! # Example
//!
//! ```no_run
//! use mailsync::api::TemplatesApi;
//! use mailsync::events::JsonEventSink;
//! use mailsync::sync::{SyncOptions, TemplateSynchronizer};
//!
//! let api = TemplatesApi::new("api-key", "https://mandrillapp.com/api/1.0");
//! let options = SyncOptions::new("emails/templates", "noreply@example.com");
//! let sink = JsonEventSink::stdout();
//!
//! let synchronizer = TemplateSynchronizer::new(api, options, &sink).unwrap();
//! let report = synchronizer.deploy();
//! assert!(report.success());
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod events;
pub mod mappings;
pub mod sync;

pub use error::{MailsyncError, Result};
