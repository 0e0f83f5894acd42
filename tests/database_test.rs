//! Integration tests for database documentation output.

use std::io::{Cursor, Read};

use specdoc::build::{build_database_document, build_database_workbook, BuildOptions};
use specdoc::render::{to_xlsx, RenderOptions};
use specdoc::{
    CancelToken, DatabaseCapability, Error, GenerateOptions, Generator, JsonMetadataSource,
    MetadataSource, NoProgress, TableInfo,
};

const TABLES: &str = r#"[
    {"name": "sys_user", "comment": "Users", "engine": "InnoDB", "collation": "utf8mb4_general_ci",
     "columns": [
        {"name": "id", "type": "bigint", "nullable": false, "primaryKey": true, "comment": "Primary key"},
        {"name": "login", "type": "varchar(64)", "nullable": false, "collation": "utf8mb4_general_ci"},
        {"name": "email", "type": "varchar(128)", "nullable": true, "defaultValue": "''"}
     ]},
    {"name": "sys_role", "comment": "Roles",
     "columns": [{"name": "id", "type": "bigint"}]},
    {"name": "biz_order", "engine": "InnoDB",
     "columns": [{"name": "id", "type": "bigint"}, {"name": "total", "type": "decimal(10,2)"}]}
]"#;

fn tables() -> Vec<TableInfo> {
    JsonMetadataSource::from_json("fixture", TABLES)
        .unwrap()
        .tables()
        .unwrap()
}

fn part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut content = String::new();
    archive
        .by_name(name)
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    content
}

#[test]
fn test_workbook_sheets_per_prefix() {
    let workbook = build_database_workbook(&tables(), &BuildOptions::new()).unwrap();
    let names: Vec<&str> = workbook.sheets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Summary", "SYS", "BIZ"]);

    let bytes = to_xlsx(&workbook, &RenderOptions::default()).unwrap();
    let book = part(&bytes, "xl/workbook.xml");
    assert!(book.contains(r#"<sheet name="SYS" sheetId="2" r:id="rId2"/>"#));
}

#[test]
fn test_summary_merges_group_column() {
    let workbook = build_database_workbook(&tables(), &BuildOptions::new()).unwrap();
    let bytes = to_xlsx(&workbook, &RenderOptions::default()).unwrap();
    let summary = part(&bytes, "xl/worksheets/sheet1.xml");

    // SYS spans rows 2-3; BIZ has a single table and stays unmerged.
    assert!(summary.contains(r#"<mergeCells count="1"><mergeCell ref="A2:A3"/></mergeCells>"#));
    assert!(summary.contains(">sys_role<"));
    assert!(summary.contains(">BIZ<"));
}

#[test]
fn test_detail_sheet_layout() {
    let workbook = build_database_workbook(&tables(), &BuildOptions::new()).unwrap();
    let sys = workbook.sheet("SYS").unwrap();

    assert_eq!(sys.get(0, 1).unwrap().text, "sys_user");
    assert_eq!(sys.get(1, 4).unwrap().text, "utf8mb4_general_ci");
    assert_eq!(sys.get(2, 4).unwrap().text, "InnoDB");
    assert_eq!(sys.get(3, 0).unwrap().text, "Column");
    assert_eq!(sys.get(4, 0).unwrap().text, "id (PK)");
    assert_eq!(sys.get(5, 0).unwrap().text, "login");
    assert_eq!(sys.get(6, 4).unwrap().text, "''");
    assert_eq!(sys.get(6, 3).unwrap().text, "Yes");
    // One blank separator row, then the second table's header block.
    assert!(sys.get(7, 0).is_none());
    assert_eq!(sys.get(8, 1).unwrap().text, "sys_role");

    let bytes = to_xlsx(&workbook, &RenderOptions::default()).unwrap();
    let detail = part(&bytes, "xl/worksheets/sheet2.xml");
    for range in ["A1:A3", "B1:C3", "E1:F1", "E2:F2", "E3:F3", "A9:A11"] {
        assert!(
            detail.contains(&format!(r#"<mergeCell ref="{}"/>"#, range)),
            "missing merge {}",
            range
        );
    }
    assert!(!detail.contains(r#"<row r="8">"#));
}

#[test]
fn test_database_document_headings() {
    let doc = build_database_document(
        &tables(),
        &BuildOptions::new().with_project_name("Shop"),
    )
    .unwrap();

    let headings: Vec<(u8, &str)> = doc.headings().collect();
    assert_eq!(
        headings,
        vec![
            (1, "SYS"),
            (2, "sys_user (Users)"),
            (2, "sys_role (Roles)"),
            (1, "BIZ"),
            (2, "biz_order"),
        ]
    );

    let first = doc.tables().next().unwrap();
    assert_eq!(first.row_count(), 6);
    assert_eq!(first.column_count(), 6);
    assert_eq!(first.total_width(), 8732);
}

#[test]
fn test_generator_picks_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let capability = DatabaseCapability::Available(Box::new(
        JsonMetadataSource::from_json("fixture", TABLES).unwrap(),
    ));
    let generator = Generator::new(GenerateOptions::new().with_project_name("Shop"));

    let xlsx = dir.path().join("schema.XLSX");
    generator
        .generate_database_doc(&capability, &xlsx, &NoProgress, &CancelToken::none())
        .unwrap();
    let bytes = std::fs::read(&xlsx).unwrap();
    assert!(part(&bytes, "[Content_Types].xml").contains("spreadsheetml"));

    let docx = dir.path().join("schema.docx");
    let report = generator
        .generate_database_doc(&capability, &docx, &NoProgress, &CancelToken::none())
        .unwrap();
    assert_eq!(report.items, 3);
    let bytes = std::fs::read(&docx).unwrap();
    assert!(part(&bytes, "word/document.xml").contains("sys_user (Users)"));

    let err = generator
        .generate_database_doc(
            &capability,
            &dir.path().join("schema.csv"),
            &NoProgress,
            &CancelToken::none(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::InvalidOutputPath { .. }));
}

#[test]
fn test_metadata_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.json");
    std::fs::write(&path, TABLES).unwrap();

    let source = JsonMetadataSource::open(&path).unwrap();
    let tables = source.tables().unwrap();
    assert_eq!(tables.len(), 3);
    assert!(tables[0].columns[0].primary_key);
    assert_eq!(tables[0].columns[2].default_value.as_deref(), Some("''"));
}
