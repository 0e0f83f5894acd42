//! Type labels and example values shown in parameter and property tables.

use super::Labels;
use crate::swagger::{
    DefinitionId, DefinitionProperty, DefinitionTable, ItemDescriptor, Parameter, Response,
};

/// Placeholder label for objects that cannot be named.
pub const OBJECT_LABEL: &str = "object";
/// Label used when nothing at all is known.
pub const DEFAULT_LABEL: &str = "string";

/// Example value for a primitive type.
pub fn example_value(kind: &str) -> &'static str {
    match kind {
        "string" => "string",
        "integer" => "0",
        "number" => "0.0",
        "boolean" => "true",
        "array" => "[]",
        _ => "{}",
    }
}

fn definition_label(table: &DefinitionTable, id: DefinitionId) -> String {
    match table.get(id) {
        Some(def) if !def.title.is_empty() => def.title.clone(),
        _ => OBJECT_LABEL.to_string(),
    }
}

fn item_label(
    table: &DefinitionTable,
    kind: &str,
    raw_ref: Option<&str>,
    reference: Option<DefinitionId>,
) -> String {
    match reference {
        Some(id) => definition_label(table, id),
        None if raw_ref.is_some() => OBJECT_LABEL.to_string(),
        None if !kind.is_empty() => kind.to_string(),
        None => OBJECT_LABEL.to_string(),
    }
}

fn descriptor_label(table: &DefinitionTable, item: &ItemDescriptor) -> String {
    item_label(table, &item.kind, item.raw_ref.as_deref(), item.reference)
}

/// Shared rule: resolved ref, then array, then primitive, then fallbacks.
fn label(
    table: &DefinitionTable,
    kind: &str,
    raw_ref: Option<&str>,
    reference: Option<DefinitionId>,
    items: Option<String>,
) -> String {
    if let Some(id) = reference {
        return definition_label(table, id);
    }
    if kind == "array" {
        if let Some(items) = items {
            return format!("array[{}]", items);
        }
    }
    if !kind.is_empty() {
        return kind.to_string();
    }
    if raw_ref.is_some() {
        return OBJECT_LABEL.to_string();
    }
    DEFAULT_LABEL.to_string()
}

/// Type label of a definition property.
pub fn property_type_label(table: &DefinitionTable, prop: &DefinitionProperty) -> String {
    let items = prop
        .items
        .as_deref()
        .map(|item| item_label(table, &item.kind, item.raw_ref.as_deref(), item.reference));
    label(
        table,
        &prop.kind,
        prop.raw_ref.as_deref(),
        prop.reference,
        items,
    )
}

/// Type label of an operation parameter.
pub fn parameter_type_label(table: &DefinitionTable, param: &Parameter) -> String {
    let items = param
        .items
        .as_ref()
        .map(|item| descriptor_label(table, item));
    label(
        table,
        &param.kind,
        param.raw_ref.as_deref(),
        param.schema,
        items,
    )
}

/// Schema column of a response row; empty when the response has no body.
pub fn response_schema_label(table: &DefinitionTable, response: &Response) -> String {
    if let Some(id) = response.schema {
        return definition_label(table, id);
    }
    match response.items {
        Some(ref item) => format!("array[{}]", descriptor_label(table, item)),
        None => String::new(),
    }
}

/// Description cell: the source text, then allowed values and the
/// collection format, one per line when present.
pub fn annotated_description(
    labels: &Labels,
    description: &str,
    enum_values: &[String],
    collection_format: &str,
) -> String {
    let mut lines = Vec::new();
    if !description.trim().is_empty() {
        lines.push(description.to_string());
    }
    if !enum_values.is_empty() {
        lines.push(format!("{}: {}", labels.allowed_values, enum_values.join(", ")));
    }
    if !collection_format.trim().is_empty() {
        lines.push(format!("{}: {}", labels.collection_format, collection_format));
    }
    lines.join("\n")
}

/// Description cell of a parameter.
pub fn parameter_description(labels: &Labels, param: &Parameter) -> String {
    annotated_description(
        labels,
        &param.description,
        &param.enum_values,
        &param.collection_format,
    )
}

/// Description cell of a definition property.
pub fn property_description(labels: &Labels, prop: &DefinitionProperty) -> String {
    annotated_description(labels, &prop.description, &prop.enum_values, "")
}

/// Example cell of a property: the source example, else the type default.
pub fn property_example(prop: &DefinitionProperty) -> String {
    prop.example
        .clone()
        .unwrap_or_else(|| example_value(&prop.kind).to_string())
}

/// Example cell of a parameter: the source example, else the type default.
pub fn parameter_example(param: &Parameter) -> String {
    param
        .example
        .clone()
        .unwrap_or_else(|| example_value(&param.kind).to_string())
}
