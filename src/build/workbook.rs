//! Database schema workbook builder (xlsx variant).

use indexmap::IndexMap;

use super::database::column_label;
use super::{BuildOptions, Labels};
use crate::database::{group_tables_by_prefix, TableInfo};
use crate::error::Result;
use crate::model::{MergeRange, Sheet, SheetStyle, Workbook};

const SUMMARY_WIDTHS: [u32; 3] = [5000, 10000, 14000];
const DETAIL_WIDTHS: [u32; 6] = [5000, 4000, 6000, 4000, 8000, 15000];

/// Build the summary sheet and one detail sheet per table-name prefix.
pub fn build_database_workbook(tables: &[TableInfo], options: &BuildOptions) -> Result<Workbook> {
    let labels = &options.labels;
    let groups = group_tables_by_prefix(tables, &labels.other_group);
    log::info!(
        "Building workbook for {} tables in {} groups",
        tables.len(),
        groups.len()
    );

    let mut workbook = Workbook::new();
    workbook.add_sheet(summary_sheet(&groups, labels)?);
    for (group, members) in &groups {
        workbook.add_sheet(detail_sheet(group, members, labels)?);
    }
    Ok(workbook)
}

fn summary_sheet(groups: &IndexMap<String, Vec<TableInfo>>, labels: &Labels) -> Result<Sheet> {
    let mut sheet = Sheet::new(&labels.summary_sheet, &SUMMARY_WIDTHS);
    let header = sheet.add_row();
    sheet.set(header, 0, &labels.group, SheetStyle::Header);
    sheet.set(header, 1, &labels.table_name, SheetStyle::Header);
    sheet.set(header, 2, &labels.description, SheetStyle::Header);

    for (group, members) in groups {
        let first = sheet.row_count();
        for (index, table) in members.iter().enumerate() {
            let row = sheet.add_row();
            if index == 0 {
                sheet.set(row, 0, group, SheetStyle::Content);
            }
            sheet.set(row, 1, &table.name, SheetStyle::Content);
            sheet.set(row, 2, text(&table.comment), SheetStyle::Content);
        }
        if members.len() > 1 {
            sheet.merge(MergeRange::new(first, sheet.row_count() - 1, 0, 0))?;
        }
    }
    Ok(sheet)
}

fn detail_sheet(group: &str, tables: &[TableInfo], labels: &Labels) -> Result<Sheet> {
    let mut sheet = Sheet::new(group, &DETAIL_WIDTHS);

    for (index, table) in tables.iter().enumerate() {
        let top = sheet.add_row();
        sheet.set(top, 0, &labels.table_name, SheetStyle::Title);
        sheet.set(top, 1, &table.name, SheetStyle::Content);
        sheet.set(top, 3, &labels.description, SheetStyle::Title);
        sheet.set(top, 4, text(&table.comment), SheetStyle::Content);

        let middle = sheet.add_row();
        sheet.set(middle, 3, &labels.collation, SheetStyle::Title);
        sheet.set(middle, 4, text(&table.collation), SheetStyle::Content);

        let bottom = sheet.add_row();
        sheet.set(bottom, 3, &labels.engine, SheetStyle::Title);
        sheet.set(bottom, 4, text(&table.engine), SheetStyle::Content);

        sheet.merge(MergeRange::new(top, bottom, 0, 0))?;
        sheet.merge(MergeRange::new(top, bottom, 1, 2))?;
        for row in top..=bottom {
            sheet.merge(MergeRange::new(row, row, 4, 5))?;
        }

        let header = sheet.add_row();
        let captions = [
            &labels.column_name,
            &labels.column_type,
            &labels.collation,
            &labels.nullable,
            &labels.default_value,
            &labels.description,
        ];
        for (col, caption) in captions.into_iter().enumerate() {
            sheet.set(header, col, caption, SheetStyle::Header);
        }

        for column in &table.columns {
            let row = sheet.add_row();
            sheet.set(row, 0, column_label(column, labels), SheetStyle::Content);
            sheet.set(row, 1, &column.data_type, SheetStyle::Content);
            sheet.set(row, 2, text(&column.collation), SheetStyle::Content);
            sheet.set(row, 3, labels.flag(column.nullable), SheetStyle::Content);
            sheet.set(row, 4, text(&column.default_value), SheetStyle::Content);
            sheet.set(row, 5, text(&column.comment), SheetStyle::Content);
        }

        if index + 1 < tables.len() {
            sheet.add_row();
        }
    }
    Ok(sheet)
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ColumnInfo;

    fn table(name: &str, columns: usize) -> TableInfo {
        TableInfo {
            name: name.to_string(),
            comment: Some(format!("{} table", name)),
            columns: (0..columns)
                .map(|i| ColumnInfo {
                    name: format!("c{}", i),
                    data_type: "int".into(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn workbook() -> Workbook {
        let tables = [
            table("sys_user", 2),
            table("sys_role", 1),
            table("biz_order", 3),
        ];
        build_database_workbook(&tables, &BuildOptions::new()).unwrap()
    }

    #[test]
    fn test_sheet_per_group() {
        let wb = workbook();
        let names: Vec<_> = wb.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Summary", "SYS", "BIZ"]);
    }

    #[test]
    fn test_summary_merges_group_column() {
        let wb = workbook();
        let summary = wb.sheet("Summary").unwrap();
        assert_eq!(summary.row_count(), 4);
        assert_eq!(summary.get(1, 0).unwrap().text, "SYS");
        assert!(summary.get(2, 0).is_none());
        assert_eq!(summary.get(3, 0).unwrap().text, "BIZ");
        // Only the two-table group is merged.
        assert_eq!(summary.merges, vec![MergeRange::new(1, 2, 0, 0)]);
        assert_eq!(summary.merges[0].to_a1(), "A2:A3");
    }

    #[test]
    fn test_detail_layout() {
        let wb = workbook();
        let sys = wb.sheet("SYS").unwrap();
        // 3 header rows + column header + 2 columns, blank, 3 + 1 + 1
        assert_eq!(sys.row_count(), 6 + 1 + 5);
        assert_eq!(sys.get(0, 0).unwrap().style, SheetStyle::Title);
        assert_eq!(sys.get(0, 1).unwrap().text, "sys_user");
        assert_eq!(sys.get(3, 0).unwrap().text, "Column");
        assert_eq!(sys.get(4, 3).unwrap().text, "No");
        assert!(sys.rows[6].iter().all(Option::is_none));
        assert_eq!(sys.get(7, 1).unwrap().text, "sys_role");
        assert!(sys.merges.contains(&MergeRange::new(0, 2, 1, 2)));
        assert!(sys.merges.contains(&MergeRange::new(7, 9, 0, 0)));
    }

    #[test]
    fn test_primary_key_marked() {
        let mut users = table("sys_user", 2);
        users.columns[0].primary_key = true;
        let wb = build_database_workbook(&[users], &BuildOptions::new()).unwrap();
        let sys = wb.sheet("SYS").unwrap();
        assert_eq!(sys.get(4, 0).unwrap().text, "c0 (PK)");
        assert_eq!(sys.get(5, 0).unwrap().text, "c1");
    }

    #[test]
    fn test_empty_input() {
        let wb = build_database_workbook(&[], &BuildOptions::new()).unwrap();
        assert_eq!(wb.sheets.len(), 1);
        assert_eq!(wb.sheets[0].row_count(), 1);
    }
}
