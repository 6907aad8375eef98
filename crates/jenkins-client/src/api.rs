//! Capability interface over the Jenkins management API.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use crate::config::JobConfig;
use crate::error::Result;
use crate::types::{
    JobDescriptor,
    JobSummary,
    LastBuild,
};

/// The full capability set of a Jenkins management-API client.
#[async_trait]
pub trait Jenkins: Send + Sync {
    /// Fetches the flat job list, keyed by job name.
    ///
    /// Job names are assumed unique; on a duplicate the later entry
    /// silently overwrites the earlier one.
    async fn get_jobs(&self) -> Result<HashMap<String, JobDescriptor>>;

    /// Fetches and decodes one job's configuration document.
    async fn get_job_config(&self, job_name: &str) -> Result<JobConfig>;

    /// Derives a summary for every job on the server, in server list
    /// order.
    ///
    /// Jobs whose configuration cannot be fetched or decoded are dropped
    /// from the result; only a failure to list jobs at all is an error.
    async fn get_job_summaries(&self) -> Result<Vec<JobSummary>>;

    /// Derives summaries from an on-disk job tree: one subdirectory of
    /// `root` per job, each holding a `config.xml`.
    ///
    /// An unreadable `root` is an error; a job directory missing its
    /// configuration file is skipped.
    async fn get_job_summaries_from_filesystem(&self, root: &Path) -> Result<Vec<JobSummary>>;

    /// Fetches the named job's most recent build snapshot.
    async fn get_last_build(&self, job_name: &str) -> Result<LastBuild>;

    /// Creates a job from a raw configuration document.
    async fn create_job(&self, job_name: &str, config_xml: &str) -> Result<()>;

    /// Deletes the named job.
    async fn delete_job(&self, job_name: &str) -> Result<()>;
}
