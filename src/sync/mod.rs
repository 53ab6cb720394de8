//! Local-to-remote template synchronization.
//!
//! The [`TemplateSynchronizer`] joins the local template directory against
//! the provider's existing templates and the override mapping file, then
//! deploys one merged record per template file.

pub mod deployer;
pub mod merge;

pub use deployer::{
    DeploymentRecord, SyncOptions, SyncReport, TemplateSynchronizer, DEFAULT_FROM_NAME,
    MAPPINGS_FILENAME,
};
