//! Template synchronizer construction and deployment.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use crate::api::{RemoteTemplate, TemplatePayload, TemplatesApi};
use crate::error::{MailsyncError, Result};
use crate::events::EventSink;
use crate::mappings::{self, TemplateOverride};

use super::merge::{merge_labels, resolve_field};

/// Sender display name used when neither the remote record nor the
/// override mapping supplies one.
pub const DEFAULT_FROM_NAME: &str = "Mailsync";

/// Default filename of the override mapping file inside the templates
/// directory.
pub const MAPPINGS_FILENAME: &str = "_mappings.yml";

/// Options for building a [`TemplateSynchronizer`].
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory holding one body file per template.
    pub templates_dir: PathBuf,

    /// Sender address used when neither the remote record nor the
    /// override mapping supplies one.
    pub default_sender: String,

    /// Appended to every base template name (e.g. `_staging`).
    pub suffix: String,

    /// Labels attached to every deployed template.
    pub labels: Vec<String>,

    /// Filename of the override mapping file.
    pub mappings_filename: String,
}

impl SyncOptions {
    /// Create options with the default suffix, labels, and mapping filename.
    pub fn new(templates_dir: impl Into<PathBuf>, default_sender: impl Into<String>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            default_sender: default_sender.into(),
            suffix: String::new(),
            labels: Vec::new(),
            mappings_filename: MAPPINGS_FILENAME.to_string(),
        }
    }
}

/// The merged description of what should be sent to the provider for one
/// template. The body is not held here; it is read from `filepath` just
/// before the remote call so peak memory stays bounded by the largest
/// single template.
#[derive(Debug, Clone)]
pub struct DeploymentRecord {
    pub name: String,
    pub filepath: PathBuf,
    pub from_email: String,
    pub from_name: String,
    pub subject: String,
    pub publish: bool,
    pub labels: Vec<String>,
}

impl DeploymentRecord {
    /// Attach the template body and produce the wire payload.
    pub fn to_payload(&self, code: String) -> TemplatePayload {
        TemplatePayload {
            name: self.name.clone(),
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
            subject: self.subject.clone(),
            code,
            publish: self.publish,
            labels: self.labels.clone(),
        }
    }
}

/// Per-run summary of what a deploy did.
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    /// Names of templates whose deployment failed.
    pub failed: Vec<String>,
}

impl SyncReport {
    /// True when no deployment item failed (including the zero-item run).
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Pushes local template files to the provider, creating or updating each
/// one.
///
/// Construction fetches the remote template directory once and computes
/// every deployment record up front; [`deploy`](Self::deploy) then walks
/// the records in name order. A failing remote call for one template is
/// reported through the event sink and does not stop the run.
pub struct TemplateSynchronizer<'a> {
    api: TemplatesApi,
    sink: &'a dyn EventSink,
    existing: HashMap<String, RemoteTemplate>,
    deployments: BTreeMap<String, DeploymentRecord>,
}

impl<'a> std::fmt::Debug for TemplateSynchronizer<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateSynchronizer")
            .field("api", &self.api)
            .field("existing", &self.existing)
            .field("deployments", &self.deployments)
            .finish()
    }
}

impl<'a> TemplateSynchronizer<'a> {
    /// Fetch remote state, load overrides, and compute deployment records.
    ///
    /// Fails if the remote listing call fails or the override mapping file
    /// exists but cannot be parsed. A missing mapping file or a missing
    /// templates directory is not an error; both are reported and yield an
    /// empty override set or an empty deployment set respectively.
    pub fn new(api: TemplatesApi, options: SyncOptions, sink: &'a dyn EventSink) -> Result<Self> {
        sink.info(
            "sync.templates.load",
            &[("message", "loading remote template list".to_string())],
        );
        let existing = Self::load_existing_cache(&api)?;
        let overrides = Self::load_overrides(&options, sink)?;
        let deployments = Self::build_deployments(&options, &existing, &overrides)?;

        Ok(Self {
            api,
            sink,
            existing,
            deployments,
        })
    }

    /// The computed deployment records, keyed by final template name.
    pub fn deployments(&self) -> &BTreeMap<String, DeploymentRecord> {
        &self.deployments
    }

    /// The remote snapshot taken at construction, keyed by lowercased slug.
    pub fn existing_templates(&self) -> &HashMap<String, RemoteTemplate> {
        &self.existing
    }

    /// Look up a template in the remote snapshot.
    pub fn get_info(&self, name: &str) -> Option<&RemoteTemplate> {
        self.existing.get(&name.to_lowercase())
    }

    /// Whether the remote snapshot contains this template.
    pub fn template_exists(&self, name: &str) -> bool {
        self.existing.contains_key(&name.to_lowercase())
    }

    /// Deploy every record, creating or updating as needed.
    ///
    /// Never fails: per-item errors are reported through the event sink
    /// and counted in the returned report.
    pub fn deploy(&self) -> SyncReport {
        let mut report = SyncReport::default();

        for (name, record) in &self.deployments {
            // read per item rather than at construction to keep peak
            // memory bounded by the largest single template
            let code = match fs::read_to_string(&record.filepath) {
                Ok(code) => code,
                Err(e) => {
                    self.sink.error(
                        "sync.templates.read",
                        &[
                            ("template", name.clone()),
                            ("message", e.to_string()),
                        ],
                    );
                    report.failed.push(name.clone());
                    continue;
                }
            };
            let payload = record.to_payload(code);

            let exists = self.template_exists(name);
            let (key, result) = if exists {
                ("sync.templates.update", self.update(&payload))
            } else {
                ("sync.templates.create", self.create(&payload))
            };

            match result {
                Ok(()) => {
                    if exists {
                        report.updated += 1;
                    } else {
                        report.created += 1;
                    }
                }
                Err(e) => {
                    self.sink.error(
                        key,
                        &[
                            ("template", name.clone()),
                            ("message", e.to_string()),
                        ],
                    );
                    report.failed.push(name.clone());
                }
            }
        }

        report
    }

    /// Report what a deploy would do without calling the mutation
    /// endpoints.
    pub fn dry_run(&self) -> SyncReport {
        let mut report = SyncReport::default();

        for name in self.deployments.keys() {
            let (action, count) = if self.template_exists(name) {
                ("would update", &mut report.updated)
            } else {
                ("would create", &mut report.created)
            };
            self.sink.info(
                "sync.templates.dry_run",
                &[
                    ("template", name.clone()),
                    ("message", format!("{} template {}", action, name)),
                ],
            );
            *count += 1;
        }

        report
    }

    fn create(&self, payload: &TemplatePayload) -> Result<()> {
        self.sink.info(
            "sync.templates.create",
            &[
                ("template", payload.name.clone()),
                ("message", format!("creating template {} via API", payload.name)),
            ],
        );
        self.api.add(payload)?;
        self.sink.info(
            "sync.templates.create",
            &[
                ("template", payload.name.clone()),
                ("message", format!("template {} created", payload.name)),
            ],
        );
        Ok(())
    }

    fn update(&self, payload: &TemplatePayload) -> Result<()> {
        self.sink.info(
            "sync.templates.update",
            &[
                ("template", payload.name.clone()),
                ("message", format!("updating template {} via API", payload.name)),
            ],
        );
        self.api.update(payload)?;
        self.sink.info(
            "sync.templates.update",
            &[
                ("template", payload.name.clone()),
                ("message", format!("template {} updated", payload.name)),
            ],
        );
        Ok(())
    }

    fn load_existing_cache(api: &TemplatesApi) -> Result<HashMap<String, RemoteTemplate>> {
        let templates = api.list()?;
        let mut cache = HashMap::new();
        for template in templates {
            cache.insert(template.slug.to_lowercase(), template);
        }
        Ok(cache)
    }

    fn load_overrides(
        options: &SyncOptions,
        sink: &dyn EventSink,
    ) -> Result<BTreeMap<String, TemplateOverride>> {
        let path = options.templates_dir.join(&options.mappings_filename);
        if !path.exists() {
            tracing::warn!("mapping override file not found at {}", path.display());
            sink.info(
                "sync.templates.mappings",
                &[(
                    "message",
                    format!("mapping override file not found at {}", path.display()),
                )],
            );
            return Ok(BTreeMap::new());
        }

        sink.info(
            "sync.templates.mappings",
            &[(
                "message",
                format!("applying metadata overrides from {}", path.display()),
            )],
        );
        mappings::load_mappings(&path)
    }

    fn build_deployments(
        options: &SyncOptions,
        existing: &HashMap<String, RemoteTemplate>,
        overrides: &BTreeMap<String, TemplateOverride>,
    ) -> Result<BTreeMap<String, DeploymentRecord>> {
        let mut deployments = BTreeMap::new();

        let entries = match fs::read_dir(&options.templates_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "templates directory not found at {}",
                    options.templates_dir.display()
                );
                return Ok(deployments);
            }
            Err(e) => return Err(MailsyncError::Io(e)),
        };

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if entry.file_name().to_string_lossy() == options.mappings_filename.as_str() {
                continue;
            }
            let Some(stem) = path.file_stem() else {
                continue;
            };

            let base_name = stem.to_string_lossy().to_lowercase();
            let name = format!("{}{}", base_name, options.suffix).to_lowercase();
            let remote = existing.get(&name);
            let mapped = overrides.get(&base_name);

            let record = Self::build_record(name.clone(), path, remote, mapped, options);
            deployments.insert(name, record);
        }

        Ok(deployments)
    }

    fn build_record(
        name: String,
        filepath: PathBuf,
        remote: Option<&RemoteTemplate>,
        mapped: Option<&TemplateOverride>,
        options: &SyncOptions,
    ) -> DeploymentRecord {
        let labels = merge_labels(
            remote.map(|r| r.labels.as_slice()).unwrap_or(&[]),
            mapped.and_then(|m| m.labels.as_deref()),
            &options.labels,
        );

        DeploymentRecord {
            from_email: resolve_field(
                remote.and_then(|r| r.from_email.as_deref()),
                mapped.and_then(|m| m.from_email.as_deref()),
                &options.default_sender,
            ),
            from_name: resolve_field(
                remote.and_then(|r| r.from_name.as_deref()),
                mapped.and_then(|m| m.from_name.as_deref()),
                DEFAULT_FROM_NAME,
            ),
            subject: resolve_field(
                remote.and_then(|r| r.subject.as_deref()),
                mapped.and_then(|m| m.subject.as_deref()),
                &name,
            ),
            publish: true,
            labels,
            name,
            filepath,
        }
    }
}
