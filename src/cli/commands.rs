//! Command implementations.
//!
//! Each function returns the process exit code for its command; `main`
//! maps errors that escape here to an error line and exit code 1.

use clap::CommandFactory;

use crate::api::TemplatesApi;
use crate::error::Result;
use crate::events::JsonEventSink;
use crate::sync::{SyncOptions, TemplateSynchronizer};

use super::args::{Cli, CompletionsArgs, ListArgs, SyncArgs};

/// Run the `sync` command.
///
/// Exit code 1 when any deployment item failed, 0 otherwise (including a
/// run that matched zero template files).
pub fn sync(args: &SyncArgs, quiet: bool) -> Result<u8> {
    let sink = if quiet {
        JsonEventSink::errors_only()
    } else {
        JsonEventSink::stdout()
    };
    let api = TemplatesApi::new(&args.api_key, &args.api_url);

    let mut options = SyncOptions::new(&args.templates_dir, &args.default_sender);
    options.suffix = args.suffix.clone();
    options.labels = args.labels.clone();
    options.mappings_filename = args.mappings_file.clone();

    let synchronizer = TemplateSynchronizer::new(api, options, &sink)?;
    let report = if args.dry_run {
        synchronizer.dry_run()
    } else {
        synchronizer.deploy()
    };

    tracing::debug!(
        "sync finished: {} created, {} updated, {} failed",
        report.created,
        report.updated,
        report.failed.len()
    );

    Ok(if report.success() { 0 } else { 1 })
}

/// Run the `list` command.
pub fn list(args: &ListArgs) -> Result<u8> {
    let api = TemplatesApi::new(&args.api_key, &args.api_url);
    let templates = api.list()?;

    for template in templates {
        let line = serde_json::to_string(&template).map_err(anyhow::Error::from)?;
        println!("{}", line);
    }

    Ok(0)
}

/// Run the `completions` command.
pub fn completions(args: &CompletionsArgs) -> Result<u8> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "mailsync", &mut std::io::stdout());
    Ok(0)
}
