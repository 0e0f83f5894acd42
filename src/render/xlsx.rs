//! SpreadsheetML (`.xlsx`) rendering.

use std::fmt::Write as _;
use std::path::Path;

use super::package::{escape_xml, write_output, Package, XML_DECLARATION};
use super::RenderOptions;
use crate::detect::{validate_output_path, OutputKind};
use crate::error::Result;
use crate::model::{cell_ref, Metadata, Sheet, SheetStyle, Workbook};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Render a workbook to `.xlsx` bytes.
pub fn to_xlsx(workbook: &Workbook, options: &RenderOptions) -> Result<Vec<u8>> {
    let metadata = Metadata {
        creator: Some(format!("specdoc {}", env!("CARGO_PKG_VERSION"))),
        ..Default::default()
    };

    let mut package = Package::new(options.compress);
    package.add("[Content_Types].xml", &content_types(workbook.sheets.len()))?;
    package.add_package_parts("xl/workbook.xml", &metadata)?;
    package.add("xl/workbook.xml", &workbook_xml(workbook))?;
    package.add("xl/_rels/workbook.xml.rels", &workbook_rels(workbook.sheets.len()))?;
    package.add("xl/styles.xml", STYLES_XML)?;
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        package.add(
            &format!("xl/worksheets/sheet{}.xml", index + 1),
            &sheet_xml(sheet),
        )?;
    }
    let bytes = package.finish()?;

    log::debug!(
        "Rendered {} sheets into {} bytes of xlsx",
        workbook.sheets.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Render a workbook and write it to an `.xlsx` path.
pub fn write_xlsx<P: AsRef<Path>>(
    workbook: &Workbook,
    path: P,
    options: &RenderOptions,
) -> Result<()> {
    let path = path.as_ref();
    validate_output_path(path, OutputKind::Xlsx)?;
    let bytes = to_xlsx(workbook, options)?;
    write_output(path, &bytes)
}

/// Index into `cellXfs` of [`STYLES_XML`].
fn style_index(style: SheetStyle) -> u8 {
    match style {
        SheetStyle::Title => 1,
        SheetStyle::Header => 2,
        SheetStyle::Content => 3,
    }
}

const STYLES_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    r#"<fonts count="2">"#,
    r#"<font><sz val="11"/><name val="Calibri"/></font>"#,
    r#"<font><b/><sz val="11"/><name val="Calibri"/></font>"#,
    r#"</fonts>"#,
    r#"<fills count="4">"#,
    r#"<fill><patternFill patternType="none"/></fill>"#,
    r#"<fill><patternFill patternType="gray125"/></fill>"#,
    r#"<fill><patternFill patternType="solid"><fgColor rgb="FFF2F2F2"/><bgColor indexed="64"/></patternFill></fill>"#,
    r#"<fill><patternFill patternType="solid"><fgColor rgb="FFD9D9D9"/><bgColor indexed="64"/></patternFill></fill>"#,
    r#"</fills>"#,
    r#"<borders count="2">"#,
    r#"<border><left/><right/><top/><bottom/><diagonal/></border>"#,
    r#"<border><left style="thin"><color auto="1"/></left><right style="thin"><color auto="1"/></right>"#,
    r#"<top style="thin"><color auto="1"/></top><bottom style="thin"><color auto="1"/></bottom><diagonal/></border>"#,
    r#"</borders>"#,
    r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#,
    r#"<cellXfs count="4">"#,
    r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#,
    r#"<xf numFmtId="0" fontId="1" fillId="2" borderId="1" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf>"#,
    r#"<xf numFmtId="0" fontId="1" fillId="3" borderId="1" xfId="0" applyFont="1" applyFill="1" applyBorder="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf>"#,
    r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="1" xfId="0" applyBorder="1" applyAlignment="1"><alignment vertical="center" wrapText="1"/></xf>"#,
    r#"</cellXfs>"#,
    r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#,
    r#"</styleSheet>"#
);

fn sheet_xml(sheet: &Sheet) -> String {
    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(xml, r#"<worksheet xmlns="{}" xmlns:r="{}">"#, NS_MAIN, NS_R);

    if !sheet.column_widths.is_empty() {
        xml.push_str("<cols>");
        for (index, width) in sheet.column_widths.iter().enumerate() {
            let _ = write!(
                xml,
                r#"<col min="{n}" max="{n}" width="{:.2}" customWidth="1"/>"#,
                f64::from(*width) / 256.0,
                n = index + 1
            );
        }
        xml.push_str("</cols>");
    }

    xml.push_str("<sheetData>");
    for (row_index, row) in sheet.rows.iter().enumerate() {
        if row.iter().all(Option::is_none) {
            continue;
        }
        let _ = write!(xml, r#"<row r="{}">"#, row_index + 1);
        for (col_index, cell) in row.iter().enumerate() {
            let Some(cell) = cell else { continue };
            let _ = write!(
                xml,
                r#"<c r="{}" s="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                cell_ref(row_index, col_index),
                style_index(cell.style),
                escape_xml(&cell.text)
            );
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData>");

    if !sheet.merges.is_empty() {
        let _ = write!(xml, r#"<mergeCells count="{}">"#, sheet.merges.len());
        for range in &sheet.merges {
            let _ = write!(xml, r#"<mergeCell ref="{}"/>"#, range.to_a1());
        }
        xml.push_str("</mergeCells>");
    }
    xml.push_str("</worksheet>");
    xml
}

fn workbook_xml(workbook: &Workbook) -> String {
    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(
        xml,
        r#"<workbook xmlns="{}" xmlns:r="{}"><sheets>"#,
        NS_MAIN, NS_R
    );
    for (index, sheet) in workbook.sheets.iter().enumerate() {
        let _ = write!(
            xml,
            r#"<sheet name="{}" sheetId="{n}" r:id="rId{n}"/>"#,
            escape_xml(&sheet.name),
            n = index + 1
        );
    }
    xml.push_str("</sheets></workbook>");
    xml
}

fn workbook_rels(sheet_count: usize) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Relationship Id="rId{n}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{n}.xml"/>"#
        );
    }
    let _ = write!(
        xml,
        r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
        sheet_count + 1
    );
    xml.push_str("</Relationships>");
    xml
}

fn content_types(sheet_count: usize) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#
    ));
    for n in 1..=sheet_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            n
        );
    }
    xml.push_str("</Types>");
    xml
}
