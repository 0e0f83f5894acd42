//! Extraction of operations from the `paths` section.

use serde_json::Value;

use super::raw::NodeExt;
use super::resolver::{item_descriptor, DefinitionTable};
use super::types::{Operation, Parameter, Response};

/// Method keys that produce operations in a Swagger 2.0 path item.
pub const HTTP_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Turns path items into a flat, ordered list of [`Operation`]s.
pub struct OperationExtractor<'a> {
    definitions: &'a DefinitionTable,
}

impl<'a> OperationExtractor<'a> {
    /// Create an extractor resolving references against `definitions`.
    pub fn new(definitions: &'a DefinitionTable) -> Self {
        Self { definitions }
    }

    /// Extract every (path, method) pair in source order.
    pub fn extract(&self, paths: Option<&Value>) -> Vec<Operation> {
        let Some(paths) = paths.and_then(Value::as_object) else {
            return Vec::new();
        };

        let mut operations = Vec::new();
        for (path, item) in paths {
            let Some(methods) = item.as_object() else {
                log::debug!("Skipping path {}: not an object", path);
                continue;
            };
            let shared = self.parameters(methods.get("parameters"), path);
            for (method, node) in methods {
                if method == "parameters" {
                    continue;
                }
                if !HTTP_METHODS.contains(&method.to_ascii_lowercase().as_str()) {
                    log::debug!("Skipping non-method key {} under {}", method, path);
                    continue;
                }
                let mut operation = self.operation(path, method, node);
                inherit_parameters(&mut operation.parameters, &shared);
                operations.push(operation);
            }
        }
        operations
    }

    fn operation(&self, path: &str, method: &str, node: &Value) -> Operation {
        let context = format!("{} {}", method.to_uppercase(), path);
        Operation {
            path: path.to_string(),
            method: method.to_string(),
            summary: node.str_field("summary"),
            description: node.str_field("description"),
            operation_id: node.str_field("operationId"),
            tags: node.string_list("tags"),
            deprecated: node.bool_field("deprecated"),
            consumes: node.string_list("consumes"),
            produces: node.string_list("produces"),
            parameters: self.parameters(node.get("parameters"), &context),
            responses: self.responses(node.get("responses"), &context),
        }
    }

    fn parameters(&self, node: Option<&Value>, context: &str) -> Vec<Parameter> {
        let Some(list) = node.and_then(Value::as_array) else {
            return Vec::new();
        };

        list.iter()
            .filter(|p| p.is_object())
            .map(|p| {
                let raw_ref = p.get("schema").and_then(|schema| schema.reference());
                let schema = self.definitions.link(raw_ref.as_deref(), context);
                let items = p
                    .get("items")
                    .or_else(|| p.get("schema").and_then(|schema| schema.get("items")))
                    .filter(|v| v.is_object())
                    .map(|items| item_descriptor(self.definitions, items, context));

                Parameter {
                    name: p.str_field("name"),
                    location: p.str_field("in"),
                    description: p.str_field("description"),
                    required: p.bool_field("required"),
                    kind: non_empty_or(p.str_field("type"), || {
                        p.get("schema").map(|s| s.str_field("type")).unwrap_or_default()
                    }),
                    format: p.str_field("format"),
                    collection_format: p.str_field("collectionFormat"),
                    enum_values: p.string_list("enum"),
                    example: p.scalar_field("x-example").or_else(|| p.scalar_field("default")),
                    raw_ref,
                    schema,
                    items,
                }
            })
            .collect()
    }

    fn responses(&self, node: Option<&Value>, context: &str) -> Vec<Response> {
        let Some(entries) = node.and_then(Value::as_object) else {
            return Vec::new();
        };

        entries
            .iter()
            .map(|(key, r)| {
                let schema_node = r.get("schema");
                let raw_ref = schema_node.and_then(|s| s.reference());
                let items = schema_node
                    .and_then(|s| s.get("items"))
                    .filter(|v| v.is_object())
                    .map(|items| item_descriptor(self.definitions, items, context));

                Response {
                    code: key.trim().parse().unwrap_or(0),
                    key: key.clone(),
                    description: r.str_field("description"),
                    schema: self.definitions.link(raw_ref.as_deref(), context),
                    items,
                }
            })
            .collect()
    }
}

/// Prepend path-level parameters the operation does not redeclare.
/// A parameter is identified by its name and location.
fn inherit_parameters(own: &mut Vec<Parameter>, shared: &[Parameter]) {
    if shared.is_empty() {
        return;
    }
    let inherited: Vec<Parameter> = shared
        .iter()
        .filter(|p| !own.iter().any(|o| o.name == p.name && o.location == p.location))
        .cloned()
        .collect();
    own.splice(0..0, inherited);
}

fn non_empty_or(value: String, fallback: impl FnOnce() -> String) -> String {
    if value.is_empty() {
        fallback()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::swagger::SchemaResolver;
    use serde_json::json;

    fn definitions() -> DefinitionTable {
        SchemaResolver::new().resolve(Some(&json!({
            "Pet": {"properties": {"name": {"type": "string"}}},
            "Error": {"properties": {"message": {"type": "string"}}}
        })))
    }

    #[test]
    fn test_paths_times_methods() {
        let defs = definitions();
        let paths = json!({
            "/pets": {"get": {}, "post": {}, "parameters": []},
            "/pets/{id}": {"get": {}, "put": {}, "delete": {}},
            "/health": {"head": {}, "x-internal": true}
        });

        let ops = OperationExtractor::new(&defs).extract(Some(&paths));
        assert_eq!(ops.len(), 6);

        let mut keys: Vec<_> = ops.iter().map(|o| o.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 6);
        assert_eq!(ops[0].key(), ("/pets", "get"));
        assert_eq!(ops[5].key(), ("/health", "head"));
    }

    #[test]
    fn test_missing_fields_default() {
        let defs = definitions();
        let paths = json!({"/x": {"get": {}}});
        let op = &OperationExtractor::new(&defs).extract(Some(&paths))[0];
        assert_eq!(op.summary, "");
        assert_eq!(op.operation_id, "");
        assert!(!op.deprecated);
        assert!(op.tags.is_empty());
        assert!(op.parameters.is_empty());
        assert!(op.responses.is_empty());
    }

    #[test]
    fn test_parameters_resolve_body_and_items() {
        let defs = definitions();
        let paths = json!({"/pets": {"post": {
            "parameters": [
                {"name": "pet", "in": "body", "required": true, "schema": {"$ref": "#/definitions/Pet"}},
                {"name": "ids", "in": "query", "type": "array", "items": {"$ref": "#/definitions/Pet"}},
                {"name": "limit", "in": "query", "type": "integer", "default": 20},
                {"name": "bad", "in": "body", "schema": {"$ref": "#/definitions/Nope"}}
            ]
        }}});

        let op = &OperationExtractor::new(&defs).extract(Some(&paths))[0];
        let pet = defs.resolve_ref("#/definitions/Pet");

        assert_eq!(op.parameters.len(), 4);
        assert_eq!(op.parameters[0].schema, pet);
        assert!(op.parameters[0].required);
        assert_eq!(op.parameters[1].items.as_ref().unwrap().reference, pet);
        assert_eq!(op.parameters[2].example.as_deref(), Some("20"));
        assert_eq!(op.parameters[3].schema, None);
        assert_eq!(
            op.parameters[3].raw_ref.as_deref(),
            Some("#/definitions/Nope")
        );
    }

    #[test]
    fn test_response_codes() {
        let defs = definitions();
        let paths = json!({"/pets": {"get": {"responses": {
            "200": {"description": "OK", "schema": {"$ref": "#/definitions/Pet"}},
            "default": {"description": "Unexpected", "schema": {"$ref": "#/definitions/Error"}},
            "404": {"description": "Missing"},
            "201": {"schema": {"type": "array", "items": {"$ref": "#/definitions/Pet"}}}
        }}}});

        let op = &OperationExtractor::new(&defs).extract(Some(&paths))[0];
        let codes: Vec<u16> = op.responses.iter().map(|r| r.code).collect();
        assert_eq!(codes, vec![200, 0, 404, 201]);
        assert_eq!(op.responses[1].key, "default");
        assert_eq!(op.responses[0].target(), defs.resolve_ref("#/definitions/Pet"));
        assert_eq!(op.responses[2].target(), None);
        assert_eq!(op.responses[3].target(), defs.resolve_ref("#/definitions/Pet"));
    }

    #[test]
    fn test_path_level_parameters() {
        let defs = definitions();
        let paths = json!({"/pets/{id}": {
            "parameters": [
                {"name": "id", "in": "path", "type": "string"},
                {"name": "trace", "in": "header", "type": "string"}
            ],
            "get": {},
            "put": {"parameters": [{"name": "id", "in": "path", "type": "integer", "required": true}]}
        }});

        let ops = OperationExtractor::new(&defs).extract(Some(&paths));
        assert_eq!(ops.len(), 2);

        let get: Vec<&str> = ops[0].parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(get, vec!["id", "trace"]);

        let put = &ops[1].parameters;
        assert_eq!(put.len(), 2);
        assert_eq!(put[0].name, "trace");
        assert_eq!(put[1].kind, "integer");
        assert!(put[1].required);
    }

    #[test]
    fn test_missing_paths() {
        let defs = DefinitionTable::new();
        assert!(OperationExtractor::new(&defs).extract(None).is_empty());
    }
}
