//! # specdoc
//!
//! Generate styled Word and Excel documentation from Swagger 2.0 API
//! descriptions and database table metadata.
//!
//! ## Quick Start
//!
//! ```no_run
//! use specdoc::{generate_api_doc, parse_file, render};
//!
//! fn main() -> specdoc::Result<()> {
//!     // One call: fetch, resolve, build and write
//!     generate_api_doc("http://localhost:8080/v2/api-docs", "out/api.docx")?;
//!
//!     // Or step by step
//!     let spec = parse_file("api-docs.json")?;
//!     let doc = specdoc::build_api_document(&spec, &Default::default())?;
//!     let bytes = render::to_docx(&doc, &render::RenderOptions::default())?;
//!     std::fs::write("api.docx", bytes)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Cyclic schemas**: `#/definitions` graphs with self and mutual references
//! - **Tag sections**: operations grouped under their declared tags
//! - **Word output**: title page, header, merged-cell tables, outline headings
//! - **Database docs**: prefix-grouped tables as an Excel workbook or Word document
//! - **Labels**: English and Chinese label sets

pub mod build;
pub mod database;
pub mod detect;
pub mod error;
pub mod generate;
pub mod model;
pub mod progress;
pub mod render;
pub mod swagger;

// Re-export commonly used types
pub use build::{build_api_document, BuildOptions, Labels, Language};
pub use database::{
    ColumnInfo, DatabaseCapability, JsonMetadataSource, MetadataSource, TableInfo,
};
pub use detect::{detect_spec_version, validate_output_path, OutputKind, SpecVersion};
pub use error::{Error, Result};
pub use generate::{GenerateOptions, GenerateReport, Generator};
pub use model::{
    Block, CellStyle, Document, Metadata, Sheet, Table, TableBuilder, TableCell, TableRow,
    TitlePage, Workbook,
};
pub use progress::{NoProgress, Progress, ProgressSink, ProgressTracker};
pub use render::{JsonFormat, PageSetup, RenderOptions, TextTableStyle};
pub use swagger::{cancellation, ApiSpec, CancelHandle, CancelToken, SpecSource};

use std::path::Path;
use std::time::Duration;

/// Parse an API description file.
///
/// # Example
///
/// ```no_run
/// use specdoc::parse_file;
///
/// let spec = parse_file("api-docs.json").unwrap();
/// println!("Operations: {}", spec.operations.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ApiSpec> {
    let data = std::fs::read(path)?;
    ApiSpec::from_bytes(&data)
}

/// Parse an API description from bytes.
///
/// # Example
///
/// ```
/// use specdoc::parse_bytes;
///
/// let spec = parse_bytes(br#"{"swagger": "2.0", "info": {"title": "Pets"}}"#).unwrap();
/// assert_eq!(spec.title, "Pets");
/// ```
pub fn parse_bytes(data: &[u8]) -> Result<ApiSpec> {
    ApiSpec::from_bytes(data)
}

/// Load an API description from a URL or file path.
///
/// URLs are fetched with the default deadline.
pub fn load_spec(location: &str) -> Result<ApiSpec> {
    Generator::default().load_spec(&SpecSource::parse(location), &CancelToken::none())
}

/// Generate a `.docx` API document from a URL or file path.
///
/// # Example
///
/// ```no_run
/// use specdoc::generate_api_doc;
///
/// let report = generate_api_doc("api-docs.json", "out/api.docx").unwrap();
/// println!("{} operations", report.items);
/// ```
pub fn generate_api_doc<P: AsRef<Path>>(location: &str, output: P) -> Result<GenerateReport> {
    Generator::default().generate_api_doc(
        &SpecSource::parse(location),
        output.as_ref(),
        &NoProgress,
        &CancelToken::none(),
    )
}

/// Generate database documentation from a JSON table listing.
///
/// The output extension picks the format: `.xlsx` or `.docx`.
pub fn generate_database_doc<P: AsRef<Path>, Q: AsRef<Path>>(
    tables: P,
    output: Q,
) -> Result<GenerateReport> {
    let source = JsonMetadataSource::open(tables)?;
    Generator::default().generate_database_doc(
        &DatabaseCapability::Available(Box::new(source)),
        output.as_ref(),
        &NoProgress,
        &CancelToken::none(),
    )
}

/// Dump the document tree built from an API description as JSON.
pub fn to_json(location: &str, format: JsonFormat) -> Result<String> {
    let spec = load_spec(location)?;
    let doc = build_api_document(&spec, &BuildOptions::default())?;
    render::to_json(&doc, format)
}

/// Render a plain-text preview of an API description.
pub fn to_text(location: &str, options: &RenderOptions) -> Result<String> {
    let spec = load_spec(location)?;
    let doc = build_api_document(&spec, &BuildOptions::default())?;
    render::to_text(&doc, options)
}

/// Builder for loading and rendering API documentation.
///
/// # Example
///
/// ```no_run
/// use specdoc::{Language, Specdoc};
///
/// Specdoc::new()
///     .with_project_name("Petstore")
///     .with_language(Language::Chinese)
///     .with_property_depth(2)
///     .load("http://localhost:8080/v2/api-docs")?
///     .write_docx("out/petstore.docx")?;
/// # Ok::<(), specdoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Specdoc {
    options: GenerateOptions,
}

impl Specdoc {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project name used in titles.
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_project_name(name);
        self
    }

    /// Set the document version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.options = self.options.with_version(version);
        self
    }

    /// Select the label language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.options = self.options.with_labels(Labels::for_language(language));
        self
    }

    /// Set nested property expansion depth.
    pub fn with_property_depth(mut self, depth: usize) -> Self {
        self.options = self.options.with_property_depth(depth);
        self
    }

    /// Set the fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.with_timeout(timeout);
        self
    }

    /// Document operations without a declared tag.
    pub fn include_untagged(mut self) -> Self {
        self.options = self.options.with_untagged(true);
        self
    }

    /// Skip the title page.
    pub fn without_title_page(mut self) -> Self {
        self.options = self.options.with_title_page(false);
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.options = self.options.with_render_options(options);
        self
    }

    /// Load an API description from a URL or file path and build its document.
    pub fn load(self, location: &str) -> Result<SpecdocResult> {
        let spec = Generator::new(self.options.clone())
            .load_spec(&SpecSource::parse(location), &CancelToken::none())?;
        self.finish(spec)
    }

    /// Build from an in-memory API description.
    pub fn load_bytes(self, data: &[u8]) -> Result<SpecdocResult> {
        let spec = ApiSpec::from_bytes(data)?;
        self.finish(spec)
    }

    fn finish(self, spec: ApiSpec) -> Result<SpecdocResult> {
        let document = build_api_document(&spec, &self.options.build)?;
        Ok(SpecdocResult {
            spec,
            document,
            render_options: self.options.render,
        })
    }
}

/// A resolved API description and the document built from it.
#[derive(Debug)]
pub struct SpecdocResult {
    /// The resolved API description
    pub spec: ApiSpec,
    /// The built document
    pub document: Document,
    render_options: RenderOptions,
}

impl SpecdocResult {
    /// Render to `.docx` bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        render::to_docx(&self.document, &self.render_options)
    }

    /// Render and write a `.docx` file.
    pub fn write_docx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::write_docx(&self.document, path, &self.render_options)
    }

    /// Dump the document tree as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render a plain-text preview.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &[u8] = br#"{
        "swagger": "2.0",
        "info": {"title": "Store", "version": "2.1"},
        "tags": [{"name": "orders"}],
        "paths": {"/orders": {"post": {"tags": ["orders"], "summary": "Create order",
            "responses": {"201": {"description": "Created"}}}}}
    }"#;

    #[test]
    fn test_specdoc_builder_options() {
        let builder = Specdoc::new()
            .with_project_name("Shop")
            .with_property_depth(3)
            .with_timeout(Duration::from_secs(5))
            .include_untagged()
            .without_title_page();

        assert_eq!(builder.options.build.project_name.as_deref(), Some("Shop"));
        assert_eq!(builder.options.build.property_depth, 3);
        assert_eq!(builder.options.timeout, Duration::from_secs(5));
        assert!(builder.options.build.include_untagged);
        assert!(!builder.options.build.include_title_page);
    }

    #[test]
    fn test_specdoc_builder_default() {
        let builder = Specdoc::default();
        assert_eq!(builder.options.build.property_depth, 1);
        assert!(builder.options.build.include_title_page);
    }

    #[test]
    fn test_load_bytes_builds_document() {
        let result = Specdoc::new().load_bytes(SPEC).unwrap();
        assert_eq!(result.spec.title, "Store");
        let headings: Vec<_> = result.document().headings().collect();
        assert!(headings.contains(&(2, "Create order (POST /orders)")));
        assert!(detect::is_zip_container(&result.to_docx().unwrap()));
    }

    #[test]
    fn test_parse_bytes_rejects_garbage() {
        assert!(matches!(parse_bytes(b"not json"), Err(Error::Json(_))));
        assert!(matches!(
            parse_bytes(br#"{"openapi": "3.0.0"}"#),
            Err(Error::InvalidSpec(_))
        ));
    }

    #[test]
    fn test_parse_file_missing() {
        assert!(matches!(
            parse_file("/nonexistent/api-docs.json"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_generate_api_doc_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("api-docs.json");
        std::fs::write(&input, SPEC).unwrap();
        let output = dir.path().join("out").join("api.docx");

        let report = generate_api_doc(input.to_str().unwrap(), &output).unwrap();
        assert_eq!(report.items, 1);
        assert!(output.exists());
    }

    #[test]
    fn test_to_text_preview() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("api-docs.json");
        std::fs::write(&input, SPEC).unwrap();

        let text = to_text(input.to_str().unwrap(), &RenderOptions::default()).unwrap();
        assert!(text.contains("Create order (POST /orders)"));
    }
}
