//! Wire types for the provider's templates API.

use serde::{Deserialize, Serialize};

/// A template record as returned by the provider.
///
/// Only the metadata needed for the sync merge is deserialized; the body
/// fields the provider also returns (`code`, `publish_code`) are dropped
/// here because they are not needed and may be large.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTemplate {
    /// The provider's canonical lowercase identifier.
    pub slug: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// Sender address, if one is stored remotely.
    #[serde(default)]
    pub from_email: Option<String>,

    /// Sender display name, if one is stored remotely.
    #[serde(default)]
    pub from_name: Option<String>,

    /// Default subject line, if one is stored remotely.
    #[serde(default)]
    pub subject: Option<String>,

    /// Labels attached to the template.
    #[serde(default)]
    pub labels: Vec<String>,
}

/// The full record sent to the provider's add and update endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct TemplatePayload {
    pub name: String,
    pub from_email: String,
    pub from_name: String,
    pub subject: String,
    pub code: String,
    pub publish: bool,
    pub labels: Vec<String>,
}
