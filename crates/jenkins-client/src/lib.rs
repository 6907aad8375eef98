//! Client library for the Jenkins HTTP management API.
//!
//! Enumerates configured build jobs, fetches and parses each job's
//! configuration document (Maven module set or Freestyle schema, detected
//! at parse time) and reduces it to a uniform [`JobSummary`], tolerating
//! per-job failures without aborting the whole enumeration. Also exposes
//! basic job lifecycle operations: create, delete and last-build lookup.
//!
//! # Architecture
//!
//! - `api` - the [`Jenkins`] capability trait
//! - `client` - the concrete [`Client`]
//! - `config` - configuration document model and schema detection
//! - `summary` - the per-job summary reducer
//! - `types` - JSON-facing API types
//!
//! # Example Usage
//!
//! ```no_run
//! use jenkins_client::{Client, Jenkins};
//!
//! # async fn run() -> jenkins_client::Result<()> {
//! let client = Client::new("https://jenkins.example.com", "user", "api-token")?;
//! for summary in client.get_job_summaries().await? {
//!     println!("{} ({:?})", summary.descriptor.name, summary.job_type);
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod error;
mod summary;
mod types;

pub use api::Jenkins;
pub use client::Client;
pub use config::{
    BranchSpec,
    Branches,
    FreestyleConfig,
    JobConfig,
    MavenConfig,
    Publishers,
    RedeployPublisher,
    RootModule,
    Scm,
    UserRemoteConfig,
    UserRemoteConfigs,
};
pub use error::{
    Error,
    Result,
};
pub use types::{
    JobDescriptor,
    JobSummary,
    JobType,
    LastBuild,
};
