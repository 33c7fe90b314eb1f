//! Trestle HTTP Client
//!
//! A small, type-safe client for the parts of the Jenkins remote API that
//! are needed to trigger builds and follow them to completion.
//!
//! # Example
//!
//! ```no_run
//! use trestle_client::JenkinsClient;
//! use trestle_core::domain::job::JobPath;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JenkinsClient::new("http://localhost:8080")
//!         .with_basic_auth("admin", "api-token");
//!
//!     let queue_id = client.trigger_build(&JobPath::parse("my-folder/app")).await?;
//!     println!("Queued as item {}", queue_id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod builds;
mod jobs;
mod queue;

pub use error::{ClientError, Result};

use reqwest::{Client, IntoUrl, Method, RequestBuilder};
use std::fmt;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Credentials sent with every request
#[derive(Clone)]
struct BasicAuth {
    username: String,
    password: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// HTTP client for a Jenkins controller
///
/// Methods are grouped by resource:
/// - Queue: triggering builds and reading queue items
/// - Builds: build state, progressive console text, input gates
/// - Jobs: job lookup and folder listings
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    /// Base URL of the controller (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
    auth: Option<BasicAuth>,
}

impl JenkinsClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the controller (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use trestle_client::JenkinsClient;
    ///
    /// let client = JenkinsClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use trestle_client::JenkinsClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JenkinsClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            auth: None,
        }
    }

    /// Authenticate every request with a user name and password or API token
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some(BasicAuth {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    /// Get the base URL of the controller
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Start a request to `path` (relative to the base URL) with credentials applied
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_url(method, format!("{}{}", self.base_url, path))
    }

    /// Start a request to an absolute URL with credentials applied
    fn request_url<U: IntoUrl + fmt::Display>(&self, method: Method, url: U) -> RequestBuilder {
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match &self.auth {
            Some(auth) => builder.basic_auth(&auth.username, Some(&auth.password)),
            None => builder,
        }
    }

    /// Check the status code and deserialize a JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await.map(|_| ())
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }
}
