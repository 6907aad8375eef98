//! Job summary derivation.
//!
//! The reducer turns each discovered job into at most one [`JobSummary`].
//! Its central contract is failure isolation: a job whose configuration
//! cannot be fetched or decoded is dropped from the result, never allowed
//! to abort the enumeration of the others.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::{
    self,
    JobConfig,
};
use crate::error::{
    Error,
    Result,
};
use crate::types::{
    JobDescriptor,
    JobSummary,
    JobType,
};

/// File holding a job's configuration inside its directory.
pub(crate) const CONFIG_FILE: &str = "config.xml";

/// Folds one job into the summary sequence: `Some` to emit, `None` to
/// skip.
///
/// A document matching neither known schema still emits a summary typed
/// [`JobType::Unknown`] with empty source-control fields; the job exists
/// and is worth reporting even if we cannot read its configuration shape.
pub(crate) fn reduce_job(
    descriptor: JobDescriptor, fetched: Result<String>,
) -> Option<JobSummary> {
    let raw = match fetched {
        Ok(raw) => raw,
        Err(err) => {
            debug!(job = %descriptor.name, %err, "skipping job: configuration unavailable");
            return None;
        }
    };

    match config::parse_config(&raw) {
        Ok(config) => Some(summarize(descriptor, &config)),
        Err(Error::UnrecognizedSchema(reason)) => {
            debug!(job = %descriptor.name, %reason, "recording job with unknown type");
            Some(JobSummary {
                descriptor,
                job_type: JobType::Unknown,
                git_url: String::new(),
                branch: String::new(),
                git_urls: Vec::new(),
                branches: Vec::new(),
            })
        }
        Err(err) => {
            debug!(job = %descriptor.name, %err, "skipping job: configuration malformed");
            None
        }
    }
}

/// Assembles a summary from a decoded configuration.
pub(crate) fn summarize(descriptor: JobDescriptor, config: &JobConfig) -> JobSummary {
    let scm = config.scm();
    let git_urls = scm.git_urls();
    let branches = scm.branch_specs();
    JobSummary {
        descriptor,
        job_type: config.job_type(),
        git_url: git_urls.first().cloned().unwrap_or_default(),
        branch: branches.first().cloned().unwrap_or_default(),
        git_urls,
        branches,
    }
}

/// Lists the immediate subdirectories of `root` as candidate job names,
/// sorted by name for a stable enumeration order.
///
/// Whether a directory actually holds a configuration file is not checked
/// here; that is deferred to the reducer so one broken job directory
/// cannot abort discovery of the others.
pub(crate) fn list_jobs_from_filesystem(root: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(root).map_err(|source| Error::Filesystem {
        path: root.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Filesystem {
            path: root.to_path_buf(),
            source,
        })?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Reads `<root>/<job_name>/config.xml`.
pub(crate) fn read_job_config(root: &Path, job_name: &str) -> Result<String> {
    let path = root.join(job_name).join(CONFIG_FILE);
    fs::read_to_string(&path).map_err(|source| Error::Filesystem { path, source })
}
