//! Database metadata for the sibling schema-documentation use case.
//!
//! The host application decides once whether database metadata is reachable
//! and hands over a [`DatabaseCapability`]. Metadata itself arrives through
//! the [`MetadataSource`] trait; [`JsonMetadataSource`] reads exported
//! table/column records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// A table and its columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    /// Table name
    pub name: String,
    /// Table comment
    #[serde(default)]
    pub comment: Option<String>,
    /// Storage engine
    #[serde(default)]
    pub engine: Option<String>,
    /// Default collation
    #[serde(default)]
    pub collation: Option<String>,
    /// Columns in ordinal order
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

/// A column of a [`TableInfo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnInfo {
    /// Column name
    pub name: String,
    /// SQL type as reported by the database
    #[serde(rename = "type", default)]
    pub data_type: String,
    /// Column comment
    #[serde(default)]
    pub comment: Option<String>,
    /// Whether NULL is allowed
    #[serde(default)]
    pub nullable: bool,
    /// Default value expression
    #[serde(default)]
    pub default_value: Option<String>,
    /// Primary key membership
    #[serde(default, alias = "isPrimaryKey")]
    pub primary_key: bool,
    /// Column collation
    #[serde(default)]
    pub collation: Option<String>,
}

/// Supplies table metadata from some database or export.
pub trait MetadataSource: Send + Sync {
    /// Short description of where metadata comes from.
    fn name(&self) -> &str;

    /// Read all tables.
    fn tables(&self) -> Result<Vec<TableInfo>>;
}

/// Whether the host can provide database metadata, chosen once at startup.
pub enum DatabaseCapability {
    /// Metadata is reachable through this source
    Available(Box<dyn MetadataSource>),
    /// No database integration
    Unavailable,
}

impl DatabaseCapability {
    /// Check if a source is present.
    pub fn is_available(&self) -> bool {
        matches!(self, DatabaseCapability::Available(_))
    }

    /// Read tables, failing with [`Error::DatabaseUnavailable`] when absent.
    pub fn tables(&self) -> Result<Vec<TableInfo>> {
        match self {
            DatabaseCapability::Available(source) => {
                log::info!("Reading table metadata from {}", source.name());
                source.tables()
            }
            DatabaseCapability::Unavailable => Err(Error::DatabaseUnavailable),
        }
    }
}

impl std::fmt::Debug for DatabaseCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseCapability::Available(source) => {
                f.debug_tuple("Available").field(&source.name()).finish()
            }
            DatabaseCapability::Unavailable => f.write_str("Unavailable"),
        }
    }
}

/// Metadata read from a JSON array of table records.
#[derive(Debug, Clone)]
pub struct JsonMetadataSource {
    name: String,
    tables: Vec<TableInfo>,
}

impl JsonMetadataSource {
    /// Parse table records from JSON text.
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        let tables: Vec<TableInfo> =
            serde_json::from_str(json).map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self {
            name: name.into(),
            tables,
        })
    }

    /// Read table records from a JSON file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        Self::from_json(path.display().to_string(), &json)
    }
}

impl MetadataSource for JsonMetadataSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn tables(&self) -> Result<Vec<TableInfo>> {
        Ok(self.tables.clone())
    }
}

/// Group name for a table: the upper-cased text before the first `_`.
/// `None` when that text is empty.
pub fn table_prefix(name: &str) -> Option<String> {
    name.split('_')
        .next()
        .filter(|prefix| !prefix.trim().is_empty())
        .map(str::to_uppercase)
}

/// Group tables by name prefix, keeping first-seen group order and table
/// order within each group. Tables without a prefix land in `fallback`.
pub fn group_tables_by_prefix(
    tables: &[TableInfo],
    fallback: &str,
) -> IndexMap<String, Vec<TableInfo>> {
    let mut groups: IndexMap<String, Vec<TableInfo>> = IndexMap::new();
    for table in tables {
        let group = table_prefix(&table.name).unwrap_or_else(|| fallback.to_string());
        groups.entry(group).or_default().push(table.clone());
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str) -> TableInfo {
        TableInfo {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_prefix() {
        assert_eq!(table_prefix("sys_user").as_deref(), Some("SYS"));
        assert_eq!(table_prefix("orders").as_deref(), Some("ORDERS"));
        assert_eq!(table_prefix("_hidden"), None);
        assert_eq!(table_prefix(""), None);
    }

    #[test]
    fn test_grouping_keeps_order() {
        let tables = [
            table("sys_user"),
            table("biz_order"),
            table("sys_role"),
            table("biz_item"),
        ];
        let groups = group_tables_by_prefix(&tables, "Other");
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["SYS", "BIZ"]);
        let sys: Vec<_> = groups["SYS"].iter().map(|t| t.name.as_str()).collect();
        assert_eq!(sys, vec!["sys_user", "sys_role"]);
    }

    #[test]
    fn test_json_source() {
        let json = r#"[{"name": "sys_user", "comment": "Users", "columns": [
            {"name": "id", "type": "bigint", "nullable": false, "isPrimaryKey": true},
            {"name": "nick", "type": "varchar(64)", "nullable": true, "defaultValue": "''"}
        ]}]"#;
        let source = JsonMetadataSource::from_json("export", json).unwrap();
        let tables = source.tables().unwrap();
        assert_eq!(tables[0].columns.len(), 2);
        assert!(tables[0].columns[0].primary_key);
        assert_eq!(tables[0].columns[1].default_value.as_deref(), Some("''"));
    }

    #[test]
    fn test_unavailable_capability() {
        let capability = DatabaseCapability::Unavailable;
        assert!(!capability.is_available());
        assert!(matches!(capability.tables(), Err(Error::DatabaseUnavailable)));
    }

    #[test]
    fn test_available_capability() {
        let source = JsonMetadataSource::from_json("mem", "[]").unwrap();
        let capability = DatabaseCapability::Available(Box::new(source));
        assert!(capability.is_available());
        assert!(capability.tables().unwrap().is_empty());
        assert_eq!(format!("{:?}", capability), "Available(\"mem\")");
    }
}
