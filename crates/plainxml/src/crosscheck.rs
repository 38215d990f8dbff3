//! Requirement cross-check against an expected-requirements JSON file.
//!
//! The file lists requirement numbers:
//!
//! ```json
//! {"requirements": {"numbers": [1, 2, 5]}}
//! ```
//!
//! Number `n` is expected to render as a requirement with id `r<n>`.
//!
//! Requirements whose `keyword` or `category` is outside the allowed set
//! fail the check as well.

use std::fmt;
use std::path::{Path, PathBuf};

use plainxml_renderer::InvalidRequirement;
use serde::Deserialize;

/// Cross-check error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CrossCheckError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid expected-requirements file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "expected requirements do not match the document:\n  expected: {}\n  found:    {}",
        IdList(.expected),
        IdList(.found)
    )]
    Mismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("invalid requirement attributes:\n  {}", IssueList(.0))]
    InvalidAttributes(Vec<InvalidRequirement>),
}

/// Fail if any requirement has a `keyword` or `category` outside its allowed set.
pub(crate) fn check_attributes(issues: &[InvalidRequirement]) -> Result<(), CrossCheckError> {
    if issues.is_empty() {
        return Ok(());
    }
    Err(CrossCheckError::InvalidAttributes(issues.to_vec()))
}

#[derive(Deserialize)]
struct ExpectedFile {
    requirements: ExpectedRequirements,
}

/// Requirement numbers the rendered document must contain.
#[derive(Debug, Deserialize)]
pub(crate) struct ExpectedRequirements {
    numbers: Vec<RequirementNumber>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequirementNumber {
    Integer(u64),
    Text(String),
}

impl fmt::Display for RequirementNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl ExpectedRequirements {
    /// Load expected requirement numbers from `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, CrossCheckError> {
        let content = std::fs::read_to_string(path).map_err(|source| CrossCheckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| CrossCheckError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let file: ExpectedFile = serde_json::from_str(json)?;
        Ok(file.requirements)
    }

    /// Expected requirement ids, sorted.
    pub(crate) fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.numbers.iter().map(|n| format!("r{n}")).collect();
        ids.sort();
        ids
    }

    /// Compare against the ids of rendered requirements.
    ///
    /// Order is irrelevant; both sides are compared as sorted lists, so
    /// duplicates must match too.
    pub(crate) fn check(&self, rendered: &[String]) -> Result<(), CrossCheckError> {
        let expected = self.ids();
        let mut found = rendered.to_vec();
        found.sort();

        if expected != found {
            return Err(CrossCheckError::Mismatch { expected, found });
        }
        tracing::debug!(count = found.len(), "Requirements match");
        Ok(())
    }
}

/// Comma-separated display of an id list.
struct IdList<'a>(&'a [String]);

impl fmt::Display for IdList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        f.write_str(&self.0.join(", "))?;
        f.write_str("]")
    }
}

/// One issue per line.
struct IssueList<'a>(&'a [InvalidRequirement]);

impl fmt::Display for IssueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n  ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}
