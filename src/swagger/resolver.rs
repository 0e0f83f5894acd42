//! Resolution of the `definitions` section into a navigable graph.
//!
//! Resolution is two-pass. The first pass builds every [`Definition`] with
//! its properties and records raw reference strings; the second pass links
//! those strings to [`DefinitionId`]s. Links are ids into an arena, so
//! self-referential and mutually referential definitions need no recursion.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::raw::{NodeExt, DEFINITIONS_PREFIX};
use super::types::{Definition, DefinitionId, DefinitionProperty, ItemDescriptor};

/// Arena of resolved definitions keyed by declaration id.
#[derive(Debug, Clone, Default)]
pub struct DefinitionTable {
    definitions: Vec<Definition>,
    index: IndexMap<String, DefinitionId>,
}

impl DefinitionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Get a definition by id.
    pub fn get(&self, id: DefinitionId) -> Option<&Definition> {
        self.definitions.get(id.0)
    }

    /// Find the id registered for a reference string.
    pub fn resolve_ref(&self, reference: &str) -> Option<DefinitionId> {
        self.index.get(reference).copied()
    }

    /// Get a definition by its reference string, e.g. `#/definitions/Pet`.
    pub fn lookup(&self, reference: &str) -> Option<&Definition> {
        self.resolve_ref(reference).and_then(|id| self.get(id))
    }

    /// Declaration ids in source order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Iterate over definitions in source order.
    pub fn iter(&self) -> impl Iterator<Item = (DefinitionId, &Definition)> {
        self.definitions
            .iter()
            .enumerate()
            .map(|(i, def)| (DefinitionId(i), def))
    }

    /// Resolve a raw reference into an id, logging dangling references.
    pub(crate) fn link(&self, raw_ref: Option<&str>, context: &str) -> Option<DefinitionId> {
        let raw_ref = raw_ref?;
        let id = self.resolve_ref(raw_ref);
        if id.is_none() {
            log::debug!("Unresolved reference {} in {}", raw_ref, context);
        }
        id
    }

    /// Register a definition, replacing any earlier one with the same id.
    fn insert(&mut self, definition: Definition) -> DefinitionId {
        if let Some(&existing) = self.index.get(&definition.id) {
            log::warn!("Duplicate definition {} replaces earlier entry", definition.id);
            self.definitions[existing.0] = definition;
            return existing;
        }
        let id = DefinitionId(self.definitions.len());
        self.index.insert(definition.id.clone(), id);
        self.definitions.push(definition);
        id
    }
}

/// Builds a [`DefinitionTable`] from the raw `definitions` node.
#[derive(Debug, Default)]
pub struct SchemaResolver;

impl SchemaResolver {
    /// Create a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Resolve the `definitions` section. A missing or non-object node gives
    /// an empty table.
    pub fn resolve(&self, definitions: Option<&Value>) -> DefinitionTable {
        let mut table = DefinitionTable::new();
        let Some(entries) = definitions.and_then(Value::as_object) else {
            return table;
        };

        // Pass 1: shells with raw references.
        for (key, node) in entries {
            table.insert(build_definition(key, node));
        }

        // Pass 2: link references. Only this definition's own properties are
        // written; other definitions are read through the index.
        for position in 0..table.definitions.len() {
            let mut properties = std::mem::take(&mut table.definitions[position].properties);
            let owner = table.definitions[position].id.clone();
            for property in &mut properties {
                link_property(&table, property, &owner);
            }
            table.definitions[position].properties = properties;
        }

        log::debug!("Resolved {} definitions", table.len());
        table
    }
}

fn build_definition(key: &str, node: &Value) -> Definition {
    let title = node.str_field("title");
    let mut definition = Definition::new(
        format!("{}{}", DEFINITIONS_PREFIX, key),
        if title.is_empty() { key.to_string() } else { title },
    );
    definition.kind = node.str_field("type");
    definition.required = node.string_list("required");

    if let Some(properties) = node.object_field("properties") {
        definition.properties = build_properties(properties, &definition.required);
    }
    definition
}

fn build_properties(properties: &Map<String, Value>, required: &[String]) -> Vec<DefinitionProperty> {
    properties
        .iter()
        .map(|(name, node)| {
            let mut property = build_property(node);
            property.name = name.clone();
            property.required = required.iter().any(|r| r == name);
            if let Some(items) = node.get("items").filter(|v| v.is_object()) {
                let mut item = build_property(items);
                // Item descriptors inherit the owning property's description.
                item.description = property.description.clone();
                property.items = Some(Box::new(item));
            }
            property
        })
        .collect()
}

fn build_property(node: &Value) -> DefinitionProperty {
    DefinitionProperty {
        kind: node.str_field("type"),
        format: node.str_field("format"),
        description: node.str_field("description"),
        enum_values: node.string_list("enum"),
        example: node.scalar_field("example"),
        raw_ref: node.reference(),
        ..Default::default()
    }
}

fn link_property(table: &DefinitionTable, property: &mut DefinitionProperty, owner: &str) {
    property.reference = table.link(property.raw_ref.as_deref(), owner);
    if let Some(item) = property.items.as_mut() {
        item.reference = table.link(item.raw_ref.as_deref(), owner);
    }
}

/// Build an item descriptor from an `items` node and resolve its reference.
pub(crate) fn item_descriptor(
    table: &DefinitionTable,
    node: &Value,
    context: &str,
) -> ItemDescriptor {
    let raw_ref = node.reference();
    let reference = table.link(raw_ref.as_deref(), context);
    ItemDescriptor {
        kind: node.str_field("type"),
        format: node.str_field("format"),
        raw_ref,
        reference,
    }
}
