//! API description types produced by resolution and extraction.

use serde::{Deserialize, Serialize};

/// Index of a [`Definition`] inside a [`DefinitionTable`](super::DefinitionTable).
///
/// Properties, parameters and responses refer to definitions through this id
/// instead of owning them, so cyclic schemas are just ids pointing at each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefinitionId(pub(crate) usize);

impl DefinitionId {
    /// Position of the definition in declaration order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A named object type from the `definitions` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    /// Declaration id, e.g. `#/definitions/Pet`
    pub id: String,

    /// Display title (the definition key when the source has none)
    pub title: String,

    /// Schema kind, usually `object`
    pub kind: String,

    /// Names of required properties, in source order
    pub required: Vec<String>,

    /// Declared properties, in source order
    pub properties: Vec<DefinitionProperty>,
}

impl Definition {
    /// Create an empty definition shell.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: String::new(),
            required: Vec::new(),
            properties: Vec::new(),
        }
    }

    /// Find a property by name.
    pub fn property(&self, name: &str) -> Option<&DefinitionProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Check if the definition declares any properties.
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }
}

/// A property of a [`Definition`], or the item descriptor of an array property.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefinitionProperty {
    /// Property name (empty for item descriptors)
    pub name: String,

    /// Primitive type (`string`, `integer`, `array`, ...) or empty
    pub kind: String,

    /// Type format (`int64`, `date-time`, ...)
    pub format: String,

    /// Free-form description
    pub description: String,

    /// Whether the owning definition lists this property as required
    pub required: bool,

    /// Allowed values when the property is an enum
    pub enum_values: Vec<String>,

    /// Example value given by the source, if any
    pub example: Option<String>,

    /// Normalized reference id as written in the source
    pub raw_ref: Option<String>,

    /// Resolved reference, `None` when absent or dangling
    pub reference: Option<DefinitionId>,

    /// Item descriptor for `array` properties
    pub items: Option<Box<DefinitionProperty>>,
}

impl DefinitionProperty {
    /// Create a named property of the given primitive type.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Check if the source declared a reference that did not resolve.
    pub fn is_dangling(&self) -> bool {
        self.raw_ref.is_some() && self.reference.is_none()
    }

    /// The definition this property leads to, directly or through its items.
    pub fn target(&self) -> Option<DefinitionId> {
        self.reference
            .or_else(|| self.items.as_ref().and_then(|item| item.reference))
    }
}

/// Array item descriptor attached to a parameter or response schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    /// Item primitive type
    pub kind: String,

    /// Item format
    pub format: String,

    /// Normalized reference id as written in the source
    pub raw_ref: Option<String>,

    /// Resolved item definition
    pub reference: Option<DefinitionId>,
}

/// One HTTP method bound to one path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Path template, e.g. `/pets/{id}`
    pub path: String,

    /// HTTP method as declared (lowercase in Swagger documents)
    pub method: String,

    /// Short summary
    pub summary: String,

    /// Long description
    pub description: String,

    /// Operation id
    pub operation_id: String,

    /// Declared tags
    pub tags: Vec<String>,

    /// Deprecation flag
    pub deprecated: bool,

    /// Accepted request media types
    pub consumes: Vec<String>,

    /// Produced response media types
    pub produces: Vec<String>,

    /// Parameters in source order
    pub parameters: Vec<Parameter>,

    /// Responses in source order
    pub responses: Vec<Response>,
}

impl Operation {
    /// Method in the upper-case form used for display.
    pub fn method_upper(&self) -> String {
        self.method.to_uppercase()
    }

    /// Identity of the operation inside a document.
    pub fn key(&self) -> (&str, &str) {
        (&self.path, &self.method)
    }
}

/// An operation parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Location: `path`, `query`, `header`, `body`, `formData`
    pub location: String,

    /// Free-form description
    pub description: String,

    /// Required flag
    pub required: bool,

    /// Primitive type (empty for body parameters)
    pub kind: String,

    /// Type format
    pub format: String,

    /// Array serialization style
    pub collection_format: String,

    /// Allowed values
    pub enum_values: Vec<String>,

    /// Example value given by the source, if any
    pub example: Option<String>,

    /// Normalized body schema reference as written in the source
    pub raw_ref: Option<String>,

    /// Resolved body schema
    pub schema: Option<DefinitionId>,

    /// Array item descriptor
    pub items: Option<ItemDescriptor>,
}

impl Parameter {
    /// The definition this parameter leads to, directly or through its items.
    pub fn target(&self) -> Option<DefinitionId> {
        self.schema
            .or_else(|| self.items.as_ref().and_then(|item| item.reference))
    }
}

/// An operation response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Numeric status code, `0` for non-numeric keys such as `default`
    pub code: u16,

    /// The response key as written in the source
    pub key: String,

    /// Free-form description
    pub description: String,

    /// Resolved response schema
    pub schema: Option<DefinitionId>,

    /// Item descriptor when the schema is an array
    pub items: Option<ItemDescriptor>,
}

impl Response {
    /// The definition this response leads to, directly or through its items.
    pub fn target(&self) -> Option<DefinitionId> {
        self.schema
            .or_else(|| self.items.as_ref().and_then(|item| item.reference))
    }
}

/// A declared tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,

    /// Tag description
    pub description: String,
}
