//! End-to-end generation pipelines.
//!
//! A [`Generator`] runs one request at a time on the calling thread:
//! validate the target, load, resolve, build, render, write. Every run owns
//! its intermediate state, so concurrent generators never share anything.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::build::{
    build_api_document, build_database_document, build_database_workbook, BuildOptions, Labels,
};
use crate::database::DatabaseCapability;
use crate::detect::{validate_output_path, OutputKind};
use crate::error::{Error, Result};
use crate::progress::{ProgressSink, ProgressTracker};
use crate::render::{to_docx, to_xlsx, write_output, RenderOptions};
use crate::swagger::source::DEFAULT_FETCH_TIMEOUT;
use crate::swagger::{ApiSpec, CancelToken, SpecSource};

/// Steps reported by the API pipeline.
const API_STEPS: u32 = 5;
/// Steps reported by the database pipeline.
const DATABASE_STEPS: u32 = 4;

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Document builder options
    pub build: BuildOptions,

    /// Container rendering options
    pub render: RenderOptions,

    /// Upper bound for fetching the source document
    pub timeout: Duration,
}

impl GenerateOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project name.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.build = self.build.with_project_name(name);
        self
    }

    /// Set the document version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.build = self.build.with_version(version);
        self
    }

    /// Set the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the nested property expansion depth.
    pub fn with_property_depth(mut self, depth: usize) -> Self {
        self.build = self.build.with_property_depth(depth);
        self
    }

    /// Set the labels.
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.build = self.build.with_labels(labels);
        self
    }

    /// Pin the generation time.
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.build = self.build.with_generated_at(at);
        self
    }

    /// Enable or disable the running header.
    pub fn with_header(mut self, include: bool) -> Self {
        self.build = self.build.with_header(include);
        self
    }

    /// Enable or disable the title page.
    pub fn with_title_page(mut self, include: bool) -> Self {
        self.build = self.build.with_title_page(include);
        self
    }

    /// Enable or disable the untagged section.
    pub fn with_untagged(mut self, include: bool) -> Self {
        self.build = self.build.with_untagged(include);
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            build: BuildOptions::default(),
            render: RenderOptions::default(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// File that was written
    pub output: PathBuf,
    /// Size of the written container
    pub bytes: usize,
    /// Blocks or sheets in the generated output
    pub sections: usize,
    /// Operations or tables documented
    pub items: usize,
}

/// Runs generation requests.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GenerateOptions,
}

impl Generator {
    /// Create a generator.
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Get the options.
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Load and resolve an API description.
    pub fn load_spec(&self, source: &SpecSource, cancel: &CancelToken) -> Result<ApiSpec> {
        let bytes = source.load(self.options.timeout, cancel)?;
        ApiSpec::from_bytes(&bytes)
    }

    /// Generate API documentation from `source` into a `.docx` file.
    pub fn generate_api_doc(
        &self,
        source: &SpecSource,
        output: &Path,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<GenerateReport> {
        validate_output_path(output, OutputKind::Docx)?;
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut progress = ProgressTracker::new(sink, API_STEPS);
        let location = source.location();
        log::info!("Generating API documentation from {}", location);

        progress.begin(&format!("Fetching {}", location));
        let data = source.load(self.options.timeout, cancel)?;

        progress.advance("Resolving definitions");
        let spec = ApiSpec::from_bytes(&data)?;
        log::info!(
            "Resolved {} definitions and {} operations",
            spec.definitions.len(),
            spec.operations.len()
        );

        progress.advance("Building document");
        let doc = build_api_document(&spec, &self.options.build)?;

        progress.advance("Rendering document");
        let bytes = to_docx(&doc, &self.options.render)?;

        progress.advance(&format!("Writing {}", output.display()));
        write_output(output, &bytes)?;
        progress.finish("Done");

        Ok(GenerateReport {
            output: output.to_path_buf(),
            bytes: bytes.len(),
            sections: doc.block_count(),
            items: spec.operations.len(),
        })
    }

    /// Generate database documentation into a `.xlsx` workbook or a `.docx`
    /// document, chosen by the output extension.
    pub fn generate_database_doc(
        &self,
        capability: &DatabaseCapability,
        output: &Path,
        sink: &dyn ProgressSink,
        cancel: &CancelToken,
    ) -> Result<GenerateReport> {
        let Some(kind) = OutputKind::from_path(output) else {
            return Err(Error::InvalidOutputPath {
                path: output.to_path_buf(),
                expected: "xlsx or .docx",
            });
        };
        if !capability.is_available() {
            return Err(Error::DatabaseUnavailable);
        }
        if cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let mut progress = ProgressTracker::new(sink, DATABASE_STEPS);
        progress.begin("Reading table metadata");
        let tables = capability.tables()?;

        progress.advance("Building document");
        let (bytes, sections) = match kind {
            OutputKind::Xlsx => {
                let workbook = build_database_workbook(&tables, &self.options.build)?;
                progress.advance("Rendering workbook");
                (to_xlsx(&workbook, &self.options.render)?, workbook.sheets.len())
            }
            OutputKind::Docx => {
                let doc = build_database_document(&tables, &self.options.build)?;
                progress.advance("Rendering document");
                (to_docx(&doc, &self.options.render)?, doc.block_count())
            }
        };

        progress.advance(&format!("Writing {}", output.display()));
        write_output(output, &bytes)?;
        progress.finish("Done");

        Ok(GenerateReport {
            output: output.to_path_buf(),
            bytes: bytes.len(),
            sections,
            items: tables.len(),
        })
    }
}
