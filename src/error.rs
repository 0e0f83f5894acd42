//! Error types for specdoc library.

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for specdoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating documentation.
///
/// Only fetch, parse, layout and write failures surface here. Missing fields,
/// dangling references and unknown tags are absorbed with defaults.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The API description could not be retrieved.
    #[error("Failed to fetch API description from {location}: {message}")]
    Fetch {
        /// Where the document was requested from
        location: String,
        /// Underlying failure
        message: String,
    },

    /// Retrieval did not finish within the configured deadline.
    #[error("Fetching {location} timed out after {timeout:?}")]
    FetchTimeout {
        /// Where the document was requested from
        location: String,
        /// The deadline that elapsed
        timeout: Duration,
    },

    /// The run was cancelled before the pipeline started.
    #[error("Generation cancelled")]
    Cancelled,

    /// The API description is not valid JSON.
    #[error("Malformed API description: {0}")]
    Json(#[from] serde_json::Error),

    /// The API description is JSON but not a usable Swagger document.
    #[error("Invalid API description: {0}")]
    InvalidSpec(String),

    /// The output path does not carry the expected extension.
    #[error("Output path {} must end in .{expected}", path.display())]
    InvalidOutputPath {
        /// Rejected path
        path: PathBuf,
        /// Required extension without the dot
        expected: &'static str,
    },

    /// A table was declared with a shape its cells do not fill.
    #[error("Table layout error: {0}")]
    Layout(String),

    /// Error writing the zip container.
    #[error("Container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error during rendering (docx, xlsx, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Database metadata was requested but no source is available.
    #[error("Database metadata source is unavailable")]
    DatabaseUnavailable,

    /// The database metadata source failed.
    #[error("Database metadata error: {0}")]
    Database(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Check if this error came from retrieving the source document.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Error::Fetch { .. } | Error::FetchTimeout { .. })
    }
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let location = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        Error::Fetch {
            location,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Cancelled;
        assert_eq!(err.to_string(), "Generation cancelled");

        let err = Error::InvalidOutputPath {
            path: PathBuf::from("out/api.pdf"),
            expected: "docx",
        };
        assert_eq!(err.to_string(), "Output path out/api.pdf must end in .docx");
    }

    #[test]
    fn test_fetch_timeout_display() {
        let err = Error::FetchTimeout {
            location: "http://localhost/v2/api-docs".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert!(err.to_string().contains("timed out after 5s"));
        assert!(err.is_fetch_error());
        assert!(!Error::Cancelled.is_fetch_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().starts_with("Malformed API description"));
    }
}
