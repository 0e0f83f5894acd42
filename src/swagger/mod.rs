//! Swagger 2.0 API description handling.
//!
//! The pipeline runs leaves first: [`SchemaResolver`] builds the definition
//! graph, [`OperationExtractor`] flattens `paths` into operations, and
//! [`TagGrouper`] buckets them for sectioning.

mod extractor;
mod grouper;
mod raw;
mod resolver;
pub mod source;
mod types;

pub use extractor::{OperationExtractor, HTTP_METHODS};
pub use grouper::{TagGroups, TagGrouper};
pub use raw::{normalize_ref, NodeExt, DEFINITIONS_PREFIX};
pub use resolver::{DefinitionTable, SchemaResolver};
pub use source::{cancellation, CancelHandle, CancelToken, SpecSource};
pub use types::{
    Definition, DefinitionId, DefinitionProperty, ItemDescriptor, Operation, Parameter, Response,
    Tag,
};

use serde_json::Value;

use crate::detect::detect_spec_version;
use crate::error::{Error, Result};

/// A resolved API description.
#[derive(Debug, Clone, Default)]
pub struct ApiSpec {
    /// Document title from `info.title`
    pub title: String,

    /// Document version from `info.version`
    pub version: String,

    /// Declared tags, in order
    pub tags: Vec<Tag>,

    /// Resolved definitions
    pub definitions: DefinitionTable,

    /// Extracted operations, in source order
    pub operations: Vec<Operation>,
}

impl ApiSpec {
    /// Parse an API description from raw bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(data)?;
        Self::from_value(&value)
    }

    /// Parse an API description from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Resolve an already-parsed JSON document.
    pub fn from_value(root: &Value) -> Result<Self> {
        if !root.is_object() {
            return Err(Error::InvalidSpec(
                "document root must be a JSON object".to_string(),
            ));
        }
        let version = detect_spec_version(root)?;
        log::debug!("Detected API description format {}", version);

        let definitions = SchemaResolver::new().resolve(root.get("definitions"));
        let operations = OperationExtractor::new(&definitions).extract(root.get("paths"));
        let tags = parse_tags(root.get("tags"));
        let info = root.get("info").cloned().unwrap_or(Value::Null);

        Ok(Self {
            title: info.str_field("title"),
            version: info.str_field("version"),
            tags,
            definitions,
            operations,
        })
    }

    /// Group operations by declared tag.
    pub fn group(&self) -> TagGroups {
        TagGrouper::new().group(&self.tags, &self.operations)
    }

    /// Look up a resolved definition.
    pub fn definition(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id)
    }
}

fn parse_tags(node: Option<&Value>) -> Vec<Tag> {
    let Some(list) = node.and_then(Value::as_array) else {
        return Vec::new();
    };
    list.iter()
        .map(|t| Tag {
            name: t.str_field("name"),
            description: t.str_field("description"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_minimal() {
        let spec = ApiSpec::from_json(
            r#"{"swagger": "2.0", "info": {"title": "Pets", "version": "1.2"}, "tags": [{"name": "pets"}]}"#,
        )
        .unwrap();
        assert_eq!(spec.title, "Pets");
        assert_eq!(spec.version, "1.2");
        assert_eq!(spec.tags.len(), 1);
        assert!(spec.operations.is_empty());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(ApiSpec::from_json("{\"swagger\":"), Err(Error::Json(_))));
    }

    #[test]
    fn test_non_object_root_is_error() {
        assert!(matches!(ApiSpec::from_json("[1, 2]"), Err(Error::InvalidSpec(_))));
    }
}
