//! Configuration module
//!
//! Connection settings for the controller, resolved from CLI flags and
//! environment variables.

use anyhow::{Result, bail};
use trestle_client::JenkinsClient;

/// CLI configuration
#[derive(Clone)]
pub struct Config {
    /// Base URL of the Jenkins controller
    pub jenkins_url: String,

    /// `user:token` pair, if the controller needs authentication
    pub credentials: Option<String>,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.jenkins_url.is_empty() {
            bail!("jenkins_url cannot be empty");
        }

        if !self.jenkins_url.starts_with("http://") && !self.jenkins_url.starts_with("https://") {
            bail!("jenkins_url must start with http:// or https://");
        }

        self.basic_auth()?;
        Ok(())
    }

    /// Splits the credentials into user name and password
    pub fn basic_auth(&self) -> Result<Option<(String, String)>> {
        let Some(raw) = self.credentials.as_deref() else {
            return Ok(None);
        };

        match raw.split_once(':') {
            Some((user, password)) if !user.is_empty() => {
                Ok(Some((user.to_string(), password.to_string())))
            }
            _ => bail!("credentials must have the form USER:TOKEN"),
        }
    }

    /// Builds a client for the configured controller
    pub fn client(&self) -> Result<JenkinsClient> {
        let client = JenkinsClient::new(&self.jenkins_url);
        Ok(match self.basic_auth()? {
            Some((user, password)) => client.with_basic_auth(user, password),
            None => client,
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("jenkins_url", &self.jenkins_url)
            .field("credentials", &self.credentials.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
