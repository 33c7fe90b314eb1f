//! Build domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal result reported for a build
///
/// The value is opaque: results unknown to this crate are kept verbatim and
/// treated as non-success.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildResult(String);

impl BuildResult {
    pub const SUCCESS: &'static str = "SUCCESS";
    pub const FAILURE: &'static str = "FAILURE";
    pub const UNSTABLE: &'static str = "UNSTABLE";
    pub const ABORTED: &'static str = "ABORTED";
    pub const NOT_BUILT: &'static str = "NOT_BUILT";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn success() -> Self {
        Self::new(Self::SUCCESS)
    }

    pub fn failure() -> Self {
        Self::new(Self::FAILURE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True only for the literal `SUCCESS`
    pub fn is_success(&self) -> bool {
        self.0 == Self::SUCCESS
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One running or completed build
///
/// Begins with `building == true` and no result, then transitions exactly
/// once to `building == false` with a terminal result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    #[serde(default)]
    pub number: u64,
    pub building: bool,
    #[serde(default)]
    pub result: Option<BuildResult>,
    /// Informational; surfaced to the caller, never interpreted
    #[serde(default)]
    pub url: String,
}

impl Build {
    /// A build that is still running
    pub fn running(number: u64) -> Self {
        Self {
            number,
            building: true,
            result: None,
            url: String::new(),
        }
    }

    /// A build that has finished with `result`
    pub fn finished(number: u64, result: BuildResult) -> Self {
        Self {
            number,
            building: false,
            result: Some(result),
            url: String::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn is_finished(&self) -> bool {
        !self.building
    }

    /// True when the build has finished with `SUCCESS`
    pub fn succeeded(&self) -> bool {
        self.is_finished() && self.result.as_ref().is_some_and(BuildResult::is_success)
    }
}
