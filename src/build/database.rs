//! Database schema document builder (docx variant).

use super::{first_non_empty, BuildOptions, Labels, DEFAULT_VERSION};
use crate::database::{group_tables_by_prefix, ColumnInfo, TableInfo};
use crate::error::Result;
use crate::model::{Block, CellStyle, Document, Metadata, Table, TitlePage};

const COLUMN_WIDTHS: [u32; 6] = [1600, 1500, 1300, 900, 1300, 2132];

/// Build a document with one section per table-name prefix and one table
/// per database table.
pub fn build_database_document(tables: &[TableInfo], options: &BuildOptions) -> Result<Document> {
    let labels = &options.labels;
    let title = match first_non_empty(&[options.project_name.as_deref()], "") {
        "" => labels.database_suffix.clone(),
        project => labels.database_title(project),
    };
    let created = options.timestamp();

    let mut doc = Document::new();
    doc.metadata = Metadata {
        title: Some(title.clone()),
        subject: Some(labels.database_suffix.clone()),
        creator: Some(format!("specdoc {}", env!("CARGO_PKG_VERSION"))),
        created: Some(created),
    };
    if options.include_title_page {
        let version = first_non_empty(&[options.version.as_deref()], DEFAULT_VERSION);
        doc.title_page = Some(TitlePage::new(
            &title,
            format!("{}{}", labels.version_prefix, version),
        ));
    }
    if options.include_header {
        doc.header = Some(title);
    }

    let groups = group_tables_by_prefix(tables, &labels.other_group);
    log::info!(
        "Building database document for {} tables in {} groups",
        tables.len(),
        groups.len()
    );
    for (group, members) in &groups {
        doc.push(Block::heading(1, group));
        for table in members {
            let heading = match table.comment.as_deref().filter(|c| !c.trim().is_empty()) {
                Some(comment) => format!("{} ({})", table.name, comment),
                None => table.name.clone(),
            };
            doc.push(Block::heading(2, heading));
            doc.push(Block::Table(table_block(table, labels)?));
        }
    }
    Ok(doc)
}

/// Two header rows (name/description, collation/engine), the column header
/// row, then one row per column.
fn table_block(table: &TableInfo, labels: &Labels) -> Result<Table> {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let mut builder = Table::builder(table.columns.len() + 3, 6)
        .widths(&COLUMN_WIDTHS)
        .header_cell(&labels.table_name)
        .merged_cell(&table.name, 2, CellStyle::Content)
        .header_cell(&labels.description)
        .merged_cell(text(&table.comment), 2, CellStyle::Content)
        .new_row()
        .header_cell(&labels.collation)
        .merged_cell(text(&table.collation), 2, CellStyle::Content)
        .header_cell(&labels.engine)
        .merged_cell(text(&table.engine), 2, CellStyle::Content)
        .new_row()
        .header_cell(&labels.column_name)
        .header_cell(&labels.column_type)
        .header_cell(&labels.collation)
        .header_cell(&labels.nullable)
        .header_cell(&labels.default_value)
        .header_cell(&labels.description);

    for column in &table.columns {
        builder = builder
            .new_row()
            .cell(column_label(column, labels))
            .cell(&column.data_type)
            .cell(text(&column.collation))
            .cell(labels.flag(column.nullable))
            .cell(text(&column.default_value))
            .cell(text(&column.comment));
    }
    builder.finish()
}

/// Column name cell; primary-key columns carry the key marker.
pub(super) fn column_label(column: &ColumnInfo, labels: &Labels) -> String {
    if column.primary_key {
        format!("{} ({})", column.name, labels.primary_key)
    } else {
        column.name.clone()
    }
}
