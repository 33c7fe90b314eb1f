//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry in a folder listing, or the top of a job document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Ball colour, e.g. `blue`, `red`, `blue_anime` while building
    #[serde(default)]
    pub color: Option<String>,
}

/// Hierarchical job identifier such as `folder/sub/job`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobPath {
    segments: Vec<String>,
}

impl JobPath {
    /// Parses a slash-separated path
    ///
    /// Empty and `.` segments are dropped, so `/a//b/` and `a/./b` both
    /// name `a/b`.
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments joined with `/job/`, as used after a leading `/job/`
    ///
    /// `folder/sub/app` becomes `folder/job/sub/job/app`.
    pub fn to_url_path(&self) -> String {
        self.segments.join("/job/")
    }
}

impl From<&str> for JobPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl fmt::Display for JobPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_path_is_joined_with_job() {
        let path = JobPath::parse("my-folder/sub/test3");
        assert_eq!(path.to_url_path(), "my-folder/job/sub/job/test3");
        assert_eq!(path.to_string(), "my-folder/sub/test3");
    }

    #[test]
    fn test_path_is_normalized() {
        assert_eq!(JobPath::parse("/a//b/").to_url_path(), "a/job/b");
        assert_eq!(JobPath::parse("a/./b"), JobPath::parse("a/b"));
        assert!(JobPath::parse("/").is_root());
    }

    #[test]
    fn test_decode_job_summary() {
        let job: JobSummary = serde_json::from_str(
            r#"{"_class":"x","name":"app","url":"http://ci/job/app/","color":"blue"}"#,
        )
        .unwrap();
        assert_eq!(job.name, "app");
        assert_eq!(job.color.as_deref(), Some("blue"));
    }
}
