//! API documentation builder.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::types::{
    parameter_description, parameter_example, parameter_type_label, property_description,
    property_example, property_type_label, response_schema_label,
};
use super::{first_non_empty, format_timestamp, BuildOptions, Labels, DEFAULT_PROJECT, DEFAULT_VERSION};
use crate::error::Result;
use crate::model::{Block, CellStyle, Document, Metadata, Table, TitlePage, MAX_HEADING_LEVEL};
use crate::swagger::{
    ApiSpec, Definition, DefinitionId, DefinitionTable, Operation, Parameter, Response,
};

const INFO_WIDTHS: [u32; 2] = [2400, 6332];
const METADATA_WIDTHS: [u32; 4] = [1800, 2566, 1800, 2566];
const PARAMETER_WIDTHS: [u32; 6] = [1600, 1100, 1400, 1000, 2432, 1200];
const RESPONSE_WIDTHS: [u32; 3] = [1400, 4332, 3000];
const PROPERTY_WIDTHS: [u32; 5] = [1800, 1600, 1000, 2932, 1400];

/// Heading level of a response's property table; nested levels go deeper.
const RESPONSE_SCHEMA_LEVEL: u8 = 4;

/// Build the API document for a resolved description.
pub fn build_api_document(spec: &ApiSpec, options: &BuildOptions) -> Result<Document> {
    let labels = &options.labels;
    let project = first_non_empty(
        &[options.project_name.as_deref(), Some(spec.title.as_str())],
        DEFAULT_PROJECT,
    );
    let version = first_non_empty(
        &[options.version.as_deref(), Some(spec.version.as_str())],
        DEFAULT_VERSION,
    );
    let title = labels.document_title(project);
    let generated_at = options.timestamp();

    let groups = spec.group();
    log::info!(
        "Building document for {} operations in {} tag groups",
        groups.operation_count(),
        groups.len()
    );
    if !groups.untagged().is_empty() {
        log::info!(
            "{} operations declare no tag{}",
            groups.untagged().len(),
            if options.include_untagged { "" } else { " and are omitted" }
        );
    }

    let mut builder = ApiDocBuilder::new(&spec.definitions, labels.clone())
        .property_depth(options.property_depth)
        .metadata(&title, generated_at);
    if options.include_title_page {
        builder = builder.title_page(&title, format!("{}{}", labels.version_prefix, version));
    }
    if options.include_header {
        builder = builder.header(&title);
    }
    builder = builder.document_info(&title, version, generated_at)?;

    for (tag, operations) in groups.iter() {
        builder = builder.tag_group(tag, operations)?;
    }
    if options.include_untagged && !groups.untagged().is_empty() {
        builder = builder.tag_group(&labels.untagged, groups.untagged())?;
    }

    Ok(builder.finish())
}

/// Builder that owns an API document under construction.
///
/// Each append operation consumes the builder and hands it back, so blocks
/// land in call order.
pub struct ApiDocBuilder<'a> {
    definitions: &'a DefinitionTable,
    labels: Labels,
    property_depth: usize,
    document: Document,
}

impl<'a> ApiDocBuilder<'a> {
    /// Create a builder over a resolved definition table.
    pub fn new(definitions: &'a DefinitionTable, labels: Labels) -> Self {
        Self {
            definitions,
            labels,
            property_depth: 1,
            document: Document::new(),
        }
    }

    /// Set how many definition levels to expand under each response.
    pub fn property_depth(mut self, depth: usize) -> Self {
        self.property_depth = depth.max(1);
        self
    }

    /// Set container metadata.
    pub fn metadata(mut self, title: &str, created: DateTime<Utc>) -> Self {
        self.document.metadata = Metadata {
            title: Some(title.to_string()),
            subject: Some(self.labels.document_suffix.clone()),
            creator: Some(format!("specdoc {}", env!("CARGO_PKG_VERSION"))),
            created: Some(created),
        };
        self
    }

    /// Set the title page.
    pub fn title_page(mut self, title: &str, subtitle: impl Into<String>) -> Self {
        self.document.title_page = Some(TitlePage::new(title, subtitle));
        self
    }

    /// Set the running header.
    pub fn header(mut self, text: &str) -> Self {
        self.document.header = Some(text.to_string());
        self
    }

    /// Append a block.
    pub fn block(mut self, block: Block) -> Self {
        self.document.push(block);
        self
    }

    /// Append a heading.
    pub fn heading(self, level: u8, text: impl Into<String>) -> Self {
        self.block(Block::heading(level, text))
    }

    /// Append a table.
    pub fn table(self, table: Table) -> Self {
        self.block(Block::Table(table))
    }

    /// Append the "document information" section.
    pub fn document_info(
        self,
        title: &str,
        version: &str,
        generated_at: DateTime<Utc>,
    ) -> Result<Self> {
        let labels = &self.labels;
        let table = Table::builder(3, 2)
            .widths(&INFO_WIDTHS)
            .kv(&labels.document_name, title)
            .new_row()
            .kv(&labels.generated_at, format_timestamp(generated_at))
            .new_row()
            .kv(&labels.document_version, version)
            .finish()?;
        let heading = labels.document_info.clone();
        Ok(self.heading(1, heading).table(table))
    }

    /// Append a tag section: a level-1 heading and every operation under it.
    pub fn tag_group(self, tag: &str, operations: &[Operation]) -> Result<Self> {
        let mut builder = self.heading(1, tag);
        for operation in operations {
            builder = builder.operation(operation)?;
        }
        Ok(builder)
    }

    /// Append one operation: heading, metadata, parameters, responses.
    pub fn operation(self, operation: &Operation) -> Result<Self> {
        let summary = if operation.summary.trim().is_empty() {
            self.labels.unnamed_operation.as_str()
        } else {
            operation.summary.as_str()
        };
        let heading = format!(
            "{} ({} {})",
            summary,
            operation.method_upper(),
            operation.path
        );
        let metadata = self.metadata_table(operation)?;

        let mut builder = self.heading(2, heading).table(metadata);
        if !operation.parameters.is_empty() {
            let table = builder.parameter_table(&operation.parameters)?;
            let heading = builder.labels.request_parameters.clone();
            builder = builder.heading(3, heading).table(table);
        }
        if !operation.responses.is_empty() {
            let table = builder.response_table(&operation.responses)?;
            let heading = builder.labels.responses.clone();
            builder = builder.heading(3, heading).table(table);
            for response in &operation.responses {
                builder = builder.response_schema(response)?;
            }
        }
        Ok(builder)
    }

    /// Finish and return the document.
    pub fn finish(self) -> Document {
        self.document
    }

    fn metadata_table(&self, operation: &Operation) -> Result<Table> {
        let labels = &self.labels;
        let description = if operation.description.trim().is_empty() {
            &operation.summary
        } else {
            &operation.description
        };
        Table::builder(5, 4)
            .widths(&METADATA_WIDTHS)
            .header_cell(&labels.path)
            .merged_cell(&operation.path, 3, CellStyle::Content)
            .new_row()
            .kv(&labels.method, operation.method_upper())
            .kv(&labels.operation_id, &operation.operation_id)
            .new_row()
            .kv(&labels.consumes, operation.consumes.join(", "))
            .kv(&labels.produces, operation.produces.join(", "))
            .new_row()
            .kv(&labels.deprecated, labels.flag(operation.deprecated))
            .kv(&labels.tags, operation.tags.join(", "))
            .new_row()
            .header_cell(&labels.description)
            .merged_cell(description, 3, CellStyle::Content)
            .finish()
    }

    fn parameter_table(&self, parameters: &[Parameter]) -> Result<Table> {
        let labels = &self.labels;
        let mut table = Table::builder(parameters.len() + 1, 6)
            .widths(&PARAMETER_WIDTHS)
            .header_cell(&labels.param_name)
            .header_cell(&labels.param_location)
            .header_cell(&labels.param_type)
            .header_cell(&labels.required)
            .header_cell(&labels.param_description)
            .header_cell(&labels.example);
        for param in parameters {
            table = table
                .new_row()
                .cell(&param.name)
                .cell(&param.location)
                .cell(parameter_type_label(self.definitions, param))
                .cell(labels.flag(param.required))
                .cell(parameter_description(labels, param))
                .cell(parameter_example(param));
        }
        table.finish()
    }

    fn response_table(&self, responses: &[Response]) -> Result<Table> {
        let labels = &self.labels;
        let mut table = Table::builder(responses.len() + 1, 3)
            .widths(&RESPONSE_WIDTHS)
            .header_cell(&labels.status_code)
            .header_cell(&labels.response_description)
            .header_cell(&labels.schema);
        for response in responses {
            table = table
                .new_row()
                .cell(response_code(response))
                .cell(&response.description)
                .cell(response_schema_label(self.definitions, response));
        }
        table.finish()
    }

    fn property_table(&self, definition: &Definition) -> Result<Table> {
        let labels = &self.labels;
        let mut table = Table::builder(definition.properties.len() + 1, 5)
            .widths(&PROPERTY_WIDTHS)
            .header_cell(&labels.field_name)
            .header_cell(&labels.field_type)
            .header_cell(&labels.required)
            .header_cell(&labels.field_description)
            .header_cell(&labels.example);
        for prop in &definition.properties {
            table = table
                .new_row()
                .cell(&prop.name)
                .cell(property_type_label(self.definitions, prop))
                .cell(labels.flag(prop.required))
                .cell(property_description(labels, prop))
                .cell(property_example(prop));
        }
        table.finish()
    }

    fn response_schema(self, response: &Response) -> Result<Self> {
        let Some(id) = response.target() else {
            return Ok(self);
        };
        let mut visited = HashSet::new();
        let prefix = response_code(response);
        self.definition_section(&prefix, id, RESPONSE_SCHEMA_LEVEL, 1, &mut visited)
    }

    /// Heading plus property table for a definition, then its nested
    /// definitions while depth allows. Each definition is expanded at most
    /// once per response.
    fn definition_section(
        mut self,
        prefix: &str,
        id: DefinitionId,
        level: u8,
        depth: usize,
        visited: &mut HashSet<DefinitionId>,
    ) -> Result<Self> {
        let definitions = self.definitions;
        let Some(definition) = definitions.get(id) else {
            return Ok(self);
        };
        if !definition.has_properties() || !visited.insert(id) {
            return Ok(self);
        }

        let title = if definition.title.is_empty() {
            self.labels.schema_fallback.as_str()
        } else {
            definition.title.as_str()
        };
        let heading = format!("{} - {}", prefix, title);
        let table = self.property_table(definition)?;
        self = self.heading(level, heading).table(table);

        if depth < self.property_depth {
            let next_level = (level + 1).min(MAX_HEADING_LEVEL);
            for prop in &definition.properties {
                if let Some(target) = prop.target() {
                    self = self.definition_section(&prop.name, target, next_level, depth + 1, visited)?;
                }
            }
        }
        Ok(self)
    }
}

/// Status code cell: the numeric code, or the source key for codes like
/// `default`.
fn response_code(response: &Response) -> String {
    if response.code == 0 && !response.key.is_empty() {
        response.key.clone()
    } else {
        response.code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableCell;
    use chrono::TimeZone;
    use serde_json::json;

    fn pets_spec() -> ApiSpec {
        ApiSpec::from_value(&json!({
            "swagger": "2.0",
            "info": {"title": "Pets", "version": "2.1"},
            "tags": [{"name": "pets"}],
            "definitions": {
                "Pet": {"type": "object", "properties": {
                    "name": {"type": "string", "description": "Pet name"},
                    "age": {"type": "integer"}
                }}
            },
            "paths": {
                "/pets": {"get": {
                    "tags": ["pets"],
                    "summary": "List pets",
                    "parameters": [
                        {"name": "limit", "in": "query", "type": "integer"},
                        {"name": "kind", "in": "query", "type": "string", "required": true}
                    ],
                    "responses": {"200": {"description": "OK", "schema": {"$ref": "#/definitions/Pet"}}}
                }}
            }
        }))
        .unwrap()
    }

    fn options() -> BuildOptions {
        BuildOptions::new().with_generated_at(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }

    fn texts(row: &crate::model::TableRow) -> Vec<&str> {
        row.cells.iter().map(|c: &TableCell| c.text.as_str()).collect()
    }

    #[test]
    fn test_end_to_end_pets() {
        let doc = build_api_document(&pets_spec(), &options()).unwrap();

        let headings: Vec<_> = doc.headings().collect();
        assert!(headings.contains(&(1, "pets")));
        assert!(headings.contains(&(2, "List pets (GET /pets)")));
        assert!(headings.contains(&(4, "200 - Pet")));

        let tables: Vec<_> = doc.tables().collect();
        // info, metadata, parameters, responses, properties
        assert_eq!(tables.len(), 5);

        let metadata = tables[1];
        assert_eq!(texts(metadata.row(0).unwrap()), vec!["Path", "/pets"]);
        assert_eq!(metadata.row(1).unwrap().cells[1].text, "GET");

        let responses = tables[3];
        assert_eq!(texts(responses.row(1).unwrap()), vec!["200", "OK", "Pet"]);

        let properties = tables[4];
        assert_eq!(properties.row_count(), 3);
        assert_eq!(
            texts(properties.row(1).unwrap()),
            vec!["name", "string", "No", "Pet name", "string"]
        );
        assert_eq!(
            texts(properties.row(2).unwrap()),
            vec!["age", "integer", "No", "", "0"]
        );
    }

    #[test]
    fn test_parameter_table_has_k_plus_one_rows() {
        let doc = build_api_document(&pets_spec(), &options()).unwrap();
        let params = doc.tables().nth(2).unwrap();
        assert_eq!(params.row_count(), 3);
        assert_eq!(params.column_count(), 6);
        assert_eq!(
            texts(params.row(2).unwrap()),
            vec!["kind", "query", "string", "Yes", "", "string"]
        );
    }

    #[test]
    fn test_preamble() {
        let doc = build_api_document(&pets_spec(), &options()).unwrap();
        let title_page = doc.title_page.as_ref().unwrap();
        assert_eq!(title_page.title, "Pets API Documentation");
        assert_eq!(title_page.subtitle, "Version: 2.1");
        assert_eq!(doc.header.as_deref(), Some("Pets API Documentation"));
        assert_eq!(doc.headings().next(), Some((1, "Document Information")));

        let bare = build_api_document(
            &pets_spec(),
            &options().with_header(false).with_title_page(false),
        )
        .unwrap();
        assert!(bare.title_page.is_none());
        assert!(bare.header.is_none());
    }

    #[test]
    fn test_building_twice_is_identical() {
        let spec = pets_spec();
        let first = build_api_document(&spec, &options()).unwrap();
        let second = build_api_document(&spec, &options()).unwrap();
        assert_eq!(first.blocks, second.blocks);
        assert_eq!(first.styles, second.styles);
    }

    fn cyclic_spec() -> ApiSpec {
        ApiSpec::from_value(&json!({
            "swagger": "2.0",
            "tags": [{"name": "nodes"}],
            "definitions": {
                "Node": {"type": "object", "properties": {
                    "id": {"type": "integer"},
                    "parent": {"$ref": "#/definitions/Node"},
                    "owner": {"$ref": "#/definitions/User"}
                }},
                "User": {"type": "object", "properties": {
                    "name": {"type": "string"},
                    "home": {"$ref": "#/definitions/Node"}
                }}
            },
            "paths": {"/nodes/{id}": {"get": {
                "tags": ["nodes"],
                "responses": {"200": {"description": "OK", "schema": {"$ref": "#/definitions/Node"}}}
            }}}
        }))
        .unwrap()
    }

    #[test]
    fn test_default_depth_expands_one_level() {
        let doc = build_api_document(&cyclic_spec(), &options()).unwrap();
        let nested: Vec<_> = doc.headings().filter(|(level, _)| *level >= 4).collect();
        assert_eq!(nested, vec![(4, "200 - Node")]);
        assert!(doc
            .headings()
            .any(|h| h == (2, "Unnamed operation (GET /nodes/{id})")));
    }

    #[test]
    fn test_deeper_expansion_terminates_on_cycles() {
        let doc =
            build_api_document(&cyclic_spec(), &options().with_property_depth(10)).unwrap();
        let nested: Vec<_> = doc.headings().filter(|(level, _)| *level >= 4).collect();
        assert_eq!(nested, vec![(4, "200 - Node"), (5, "owner - User")]);
    }

    #[test]
    fn test_untagged_section() {
        let spec = ApiSpec::from_value(&json!({
            "swagger": "2.0",
            "paths": {"/ping": {"get": {"summary": "Ping"}}}
        }))
        .unwrap();

        let doc = build_api_document(&spec, &options()).unwrap();
        assert!(!doc.headings().any(|(_, text)| text == "Untagged"));

        let doc = build_api_document(&spec, &options().with_untagged(true)).unwrap();
        assert!(doc.headings().any(|h| h == (1, "Untagged")));
        assert!(doc.headings().any(|h| h == (2, "Ping (GET /ping)")));
    }

    #[test]
    fn test_enum_values_reach_description_cells() {
        let spec = ApiSpec::from_value(&json!({
            "swagger": "2.0",
            "tags": [{"name": "pets"}],
            "definitions": {
                "Pet": {"type": "object", "properties": {
                    "status": {"type": "string", "description": "Stock state", "enum": ["available", "sold"]}
                }}
            },
            "paths": {"/pets/findByStatus": {"get": {
                "tags": ["pets"],
                "summary": "Find pets",
                "parameters": [{
                    "name": "status", "in": "query", "type": "array",
                    "items": {"type": "string"}, "collectionFormat": "multi",
                    "enum": ["available", "sold"]
                }],
                "responses": {"200": {"description": "OK", "schema": {"$ref": "#/definitions/Pet"}}}
            }}}
        }))
        .unwrap();

        let doc = build_api_document(&spec, &options()).unwrap();
        let tables: Vec<_> = doc.tables().collect();
        let params = tables[2];
        assert_eq!(
            params.row(1).unwrap().cells[4].text,
            "Allowed values: available, sold\nCollection format: multi"
        );
        let properties = tables[4];
        assert_eq!(
            properties.row(1).unwrap().cells[3].text,
            "Stock state\nAllowed values: available, sold"
        );
    }

    #[test]
    fn test_chinese_labels() {
        let options = options().with_labels(Labels::chinese());
        let doc = build_api_document(&pets_spec(), &options).unwrap();
        assert_eq!(doc.headings().next(), Some((1, "文档信息")));
        assert!(doc.headings().any(|h| h == (3, "请求参数")));
    }
}
