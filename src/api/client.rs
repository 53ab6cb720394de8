//! Blocking HTTP client for the provider's templates API.
//!
//! All endpoints are JSON-over-POST under a configurable base URL, with
//! the API key carried in every request body. The base URL is injectable
//! so tests can point the client at a local mock server.

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{MailsyncError, Result};

use super::types::{RemoteTemplate, TemplatePayload};

/// Client for the provider's template endpoints.
#[derive(Debug)]
pub struct TemplatesApi {
    base_url: String,
    api_key: String,
    client: Client,
}

/// Request body wrapper that injects the API key next to the payload.
#[derive(Serialize)]
struct Keyed<'a, T: Serialize> {
    key: &'a str,
    #[serde(flatten)]
    body: &'a T,
}

/// Error payload returned by the provider on failed calls.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
}

impl TemplatesApi {
    /// Create a client with the default 30-second timeout.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_timeout(api_key, base_url, Duration::from_secs(30))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: Client::builder()
                .user_agent("mailsync")
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    /// Fetch the full snapshot of existing templates.
    pub fn list(&self) -> Result<Vec<RemoteTemplate>> {
        self.call("/templates/list", &serde_json::json!({}), None)
    }

    /// Fetch a single template by name.
    ///
    /// Returns [`MailsyncError::UnknownTemplate`] if the provider has no
    /// template with this name.
    pub fn info(&self, name: &str) -> Result<RemoteTemplate> {
        self.call("/templates/info", &serde_json::json!({ "name": name }), Some(name))
    }

    /// Create a new template.
    pub fn add(&self, payload: &TemplatePayload) -> Result<RemoteTemplate> {
        self.call("/templates/add", payload, Some(&payload.name))
    }

    /// Update an existing template.
    pub fn update(&self, payload: &TemplatePayload) -> Result<RemoteTemplate> {
        self.call("/templates/update", payload, Some(&payload.name))
    }

    /// POST a keyed JSON body to an endpoint and parse the response.
    ///
    /// `template` is the template name the call is about, used to build
    /// the distinguished unknown-template error when the provider reports
    /// one.
    fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
        template: Option<&str>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), endpoint);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&Keyed {
                key: &self.api_key,
                body,
            })
            .send()
            .map_err(|e| MailsyncError::ApiCallFailed {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            if let Ok(err) = serde_json::from_str::<ApiErrorBody>(&text) {
                if err.name == "Unknown_Template" {
                    return Err(MailsyncError::UnknownTemplate {
                        name: template.unwrap_or_default().to_string(),
                    });
                }
                if !err.message.is_empty() {
                    return Err(MailsyncError::ApiCallFailed {
                        message: err.message,
                    });
                }
            }
            return Err(MailsyncError::ApiCallFailed {
                message: format!("HTTP {} from {}", status, url),
            });
        }

        response.json::<T>().map_err(|e| MailsyncError::ApiCallFailed {
            message: e.to_string(),
        })
    }
}
