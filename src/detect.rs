//! Input format detection and output path validation.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Flavour of API description found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecVersion {
    /// `"swagger": "2.0"`
    Swagger2,
    /// No version marker; treated as Swagger 2.0 shaped
    Unversioned,
}

impl std::fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpecVersion::Swagger2 => write!(f, "Swagger 2.0"),
            SpecVersion::Unversioned => write!(f, "unversioned (Swagger 2.0 layout)"),
        }
    }
}

/// Kind of container a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// WordprocessingML document
    Docx,
    /// SpreadsheetML workbook
    Xlsx,
}

impl OutputKind {
    /// Required file extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputKind::Docx => "docx",
            OutputKind::Xlsx => "xlsx",
        }
    }

    /// Infer the kind from a path's extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "docx" => Some(OutputKind::Docx),
            "xlsx" => Some(OutputKind::Xlsx),
            _ => None,
        }
    }
}

/// Zip local file header magic shared by docx and xlsx.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect which API description flavour a parsed document uses.
///
/// OpenAPI 3.x documents are rejected; Swagger 2.0 and documents without a
/// version marker are accepted.
pub fn detect_spec_version(root: &Value) -> Result<SpecVersion> {
    if let Some(version) = root.get("openapi").and_then(Value::as_str) {
        return Err(Error::InvalidSpec(format!(
            "OpenAPI {} documents are not supported; expected Swagger 2.0",
            version
        )));
    }
    match root.get("swagger").and_then(Value::as_str) {
        Some(v) if v.starts_with('2') => Ok(SpecVersion::Swagger2),
        Some(v) => Err(Error::InvalidSpec(format!(
            "unsupported swagger version {}",
            v
        ))),
        None => Ok(SpecVersion::Unversioned),
    }
}

/// Check that `path` ends in the extension required for `kind`.
///
/// The check runs before any work starts so a bad target never costs a fetch.
pub fn validate_output_path<P: AsRef<Path>>(path: P, kind: OutputKind) -> Result<()> {
    let path = path.as_ref();
    if OutputKind::from_path(path) == Some(kind) {
        Ok(())
    } else {
        Err(Error::InvalidOutputPath {
            path: path.to_path_buf(),
            expected: kind.extension(),
        })
    }
}

/// Check if bytes look like a zip container (docx/xlsx output).
pub fn is_zip_container(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}
