//! JSON-facing types for the Jenkins management API

use serde::Deserialize;

/// One entry of the flat job list returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobDescriptor {
    pub name: String,
    /// Build-status indicator color (e.g. "blue", "yellow", "red").
    pub color: String,
    /// Absolute URL of the job's detail page.
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsResponse {
    #[serde(default)]
    pub jobs: Vec<JobDescriptor>,
}

/// Classification of a job's configuration schema.
///
/// Derived from the configuration document at parse time, never set
/// directly. `Unknown` is the fallback when the document matches neither
/// known schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobType {
    Maven,
    Freestyle,
    Unknown,
}

/// Normalized record derived from a job's descriptor and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub descriptor: JobDescriptor,
    pub job_type: JobType,
    /// First configured remote URL, empty when none.
    ///
    /// Deprecated: kept for compatibility, use `git_urls`.
    pub git_url: String,
    /// First configured branch spec, empty when none.
    ///
    /// Deprecated: kept for compatibility, use `branches`.
    pub branch: String,
    /// All configured remote repository URLs, in configuration order.
    pub git_urls: Vec<String>,
    /// All configured branch specs, in configuration order.
    pub branches: Vec<String>,
}

/// Snapshot of a job's most recent build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LastBuild {
    /// `None` while the build is still running (the server sends null).
    #[serde(default)]
    pub result: Option<String>,
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,
    pub url: String,
}
