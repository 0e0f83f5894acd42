//! Document model builders.
//!
//! Builders turn resolved inputs into the format-agnostic [`Document`] and
//! [`Workbook`](crate::model::Workbook) trees. Each builder is a value that
//! owns the tree under construction; blocks are appended in order and never
//! revisited.

pub mod api;
pub mod database;
mod labels;
pub mod types;
pub mod workbook;

pub use api::{build_api_document, ApiDocBuilder};
pub use database::build_database_document;
pub use labels::{Labels, Language};
pub use workbook::build_database_workbook;

use chrono::{DateTime, Local, Utc};

/// Timestamp format of the "generated at" cell.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Version shown when neither the caller nor the source names one.
pub const DEFAULT_VERSION: &str = "1.0";

/// Project name used when neither the caller nor the source names one.
pub const DEFAULT_PROJECT: &str = "API";

/// Options shared by the document builders.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project name; defaults to the source title
    pub project_name: Option<String>,

    /// Document version; defaults to the source version
    pub version: Option<String>,

    /// How many definition levels to expand under a response (minimum 1)
    pub property_depth: usize,

    /// Captions and header cells
    pub labels: Labels,

    /// Fixed generation time; the current time when unset
    pub generated_at: Option<DateTime<Utc>>,

    /// Write the running header
    pub include_header: bool,

    /// Write the title page
    pub include_title_page: bool,

    /// Add a section for operations without tags
    pub include_untagged: bool,
}

impl BuildOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project name.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Set the document version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the nested property expansion depth.
    pub fn with_property_depth(mut self, depth: usize) -> Self {
        self.property_depth = depth.max(1);
        self
    }

    /// Set the labels.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Pin the generation time.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Enable or disable the running header.
    pub fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Enable or disable the title page.
    pub fn with_title_page(mut self, include: bool) -> Self {
        self.include_title_page = include;
        self
    }

    /// Enable or disable the untagged section.
    pub fn with_untagged(mut self, include: bool) -> Self {
        self.include_untagged = include;
        self
    }

    /// Generation time, pinned or now.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.generated_at.unwrap_or_else(Utc::now)
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            project_name: None,
            version: None,
            property_depth: 1,
            labels: Labels::default(),
            generated_at: None,
            include_header: true,
            include_title_page: true,
            include_untagged: false,
        }
    }
}

/// Format a timestamp in local time for display.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// First non-empty value.
pub(crate) fn first_non_empty<'a>(candidates: &[Option<&'a str>], fallback: &'a str) -> &'a str {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|s| !s.trim().is_empty())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = BuildOptions::new()
            .with_project_name("Pets")
            .with_property_depth(0)
            .with_untagged(true);
        assert_eq!(options.project_name.as_deref(), Some("Pets"));
        assert_eq!(options.property_depth, 1);
        assert!(options.include_untagged);
        assert!(options.include_header);
    }

    #[test]
    fn test_first_non_empty() {
        assert_eq!(first_non_empty(&[None, Some(" "), Some("b")], "x"), "b");
        assert_eq!(first_non_empty(&[None], "x"), "x");
    }
}
