//! Concrete Jenkins management-API client.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap,
    HeaderValue,
    ACCEPT,
    AUTHORIZATION,
    CONTENT_TYPE,
};
use reqwest::Response;
use tracing::debug;

use crate::api::Jenkins;
use crate::config::{
    self,
    JobConfig,
};
use crate::error::{
    Error,
    Result,
};
use crate::summary;
use crate::types::{
    JobDescriptor,
    JobsResponse,
    JobSummary,
    LastBuild,
};

/// Jenkins management-API client.
///
/// Connection parameters are fixed at construction; the basic-auth
/// header is computed once and sent with every request.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Builds a client for `base_url`, authenticating every request with
    /// HTTP basic auth for `username`/`password`.
    pub fn new(base_url: &str, username: &str, password: &str) -> Result<Self> {
        let auth_value = format!("{username}:{password}");
        let auth_header = format!(
            "Basic {}",
            base64::Engine::encode(
                &base64::engine::general_purpose::STANDARD,
                auth_value.as_bytes()
            )
        );

        let mut auth = HeaderValue::from_str(&auth_header)
            .map_err(|e| Error::InvalidConfig(format!("invalid credentials: {e}")))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn job_url(&self, job_name: &str, tail: &str) -> String {
        format!(
            "{}/job/{}/{}",
            self.base_url,
            urlencoding::encode(job_name),
            tail
        )
    }

    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::Server { status })
        }
    }

    /// Fetches the job list in the order the server reports it.
    async fn fetch_job_list(&self) -> Result<Vec<JobDescriptor>> {
        let url = format!("{}/api/json/jobs", self.base_url);
        debug!(%url, "listing jobs");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let body = Self::check_status(response)?.text().await?;
        let decoded: JobsResponse = serde_json::from_str(&body)?;
        Ok(decoded.jobs)
    }

    /// Fetches one job's raw configuration document.
    async fn fetch_job_config_raw(&self, job_name: &str) -> Result<String> {
        let url = self.job_url(job_name, "config.xml");
        let response = self.http.get(&url).send().await?;
        Ok(Self::check_status(response)?.text().await?)
    }
}

#[async_trait]
impl Jenkins for Client {
    async fn get_jobs(&self) -> Result<HashMap<String, JobDescriptor>> {
        let jobs = self.fetch_job_list().await?;
        // Last write wins on duplicate names.
        Ok(jobs.into_iter().map(|job| (job.name.clone(), job)).collect())
    }

    async fn get_job_config(&self, job_name: &str) -> Result<JobConfig> {
        let raw = self.fetch_job_config_raw(job_name).await?;
        config::parse_config(&raw)
    }

    async fn get_job_summaries(&self) -> Result<Vec<JobSummary>> {
        let jobs = self.fetch_job_list().await?;
        let mut summaries = Vec::with_capacity(jobs.len());
        for descriptor in jobs {
            let fetched = self.fetch_job_config_raw(&descriptor.name).await;
            if let Some(summary) = summary::reduce_job(descriptor, fetched) {
                summaries.push(summary);
            }
        }
        Ok(summaries)
    }

    async fn get_job_summaries_from_filesystem(&self, root: &Path) -> Result<Vec<JobSummary>> {
        let names = summary::list_jobs_from_filesystem(root)?;
        let mut summaries = Vec::with_capacity(names.len());
        for name in names {
            let descriptor = JobDescriptor {
                name: name.clone(),
                color: String::new(),
                url: String::new(),
            };
            let read = summary::read_job_config(root, &name);
            if let Some(summary) = summary::reduce_job(descriptor, read) {
                summaries.push(summary);
            }
        }
        Ok(summaries)
    }

    async fn get_last_build(&self, job_name: &str) -> Result<LastBuild> {
        let url = self.job_url(job_name, "lastBuild/api/json");
        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let body = Self::check_status(response)?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn create_job(&self, job_name: &str, config_xml: &str) -> Result<()> {
        let url = format!(
            "{}/createItem?name={}",
            self.base_url,
            urlencoding::encode(job_name)
        );
        debug!(job = %job_name, "creating job");
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/xml")
            .body(config_xml.to_string())
            .send()
            .await?;
        Self::check_status(response).map(|_| ())
    }

    async fn delete_job(&self, job_name: &str) -> Result<()> {
        let url = self.job_url(job_name, "doDelete");
        debug!(job = %job_name, "deleting job");
        let response = self.http.post(&url).send().await?;
        Self::check_status(response).map(|_| ())
    }
}
