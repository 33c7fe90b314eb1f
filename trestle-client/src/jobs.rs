//! Job-related API endpoints

use crate::JenkinsClient;
use crate::error::Result;
use crate::queue::job_url_path;
use reqwest::Method;
use serde::Deserialize;
use trestle_core::domain::job::{JobPath, JobSummary};

#[derive(Deserialize)]
struct FolderListing {
    #[serde(default)]
    jobs: Vec<JobSummary>,
}

impl JenkinsClient {
    /// Get a job by path
    pub async fn get_job(&self, job: &JobPath) -> Result<JobSummary> {
        let path = format!("/job/{}/api/json", job_url_path(job)?);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    /// List the jobs inside `folder`
    ///
    /// The root path lists the top-level jobs of the controller.
    pub async fn list_jobs(&self, folder: &JobPath) -> Result<Vec<JobSummary>> {
        let response = self
            .request(Method::GET, &folder_api_path(folder))
            .send()
            .await?;

        let listing: FolderListing = self.handle_response(response).await?;
        Ok(listing.jobs)
    }
}

fn folder_api_path(folder: &JobPath) -> String {
    if folder.is_root() {
        "/api/json".to_string()
    } else {
        format!("/job/{}/api/json", folder.to_url_path())
    }
}
