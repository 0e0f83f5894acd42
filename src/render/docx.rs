//! WordprocessingML (`.docx`) rendering.

use std::fmt::Write as _;
use std::path::Path;

use super::package::{escape_xml, write_output, Package, XML_DECLARATION};
use super::{PageSetup, RenderOptions};
use crate::detect::{validate_output_path, OutputKind};
use crate::error::{Error, Result};
use crate::model::{
    Block, CellStyle, Document, Merge, Style, StyleKind, StyleRegistry, Table, TitlePage,
};

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Shading of header cells.
pub const HEADER_FILL: &str = "F2F2F2";

const HEADER_REL_ID: &str = "rId2";

/// Render a document to `.docx` bytes.
pub fn to_docx(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    DocxRenderer::new(options.clone()).render(doc)
}

/// Render a document and write it to a `.docx` path.
///
/// The whole container is rendered before the file is touched.
pub fn write_docx<P: AsRef<Path>>(doc: &Document, path: P, options: &RenderOptions) -> Result<()> {
    let path = path.as_ref();
    validate_output_path(path, OutputKind::Docx)?;
    let bytes = to_docx(doc, options)?;
    write_output(path, &bytes)
}

/// `.docx` renderer.
pub struct DocxRenderer {
    options: RenderOptions,
}

impl DocxRenderer {
    /// Create a new renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document into container bytes.
    pub fn render(&self, doc: &Document) -> Result<Vec<u8>> {
        let has_header = doc.header.is_some();

        let mut package = Package::new(self.options.compress);
        package.add("[Content_Types].xml", &content_types(has_header))?;
        package.add_package_parts("word/document.xml", &doc.metadata)?;
        package.add("word/document.xml", &self.document_xml(doc)?)?;
        package.add("word/styles.xml", &styles_xml(&doc.styles))?;
        if let Some(ref header) = doc.header {
            package.add("word/header1.xml", &header_xml(header))?;
        }
        package.add("word/_rels/document.xml.rels", &document_rels(has_header))?;
        let bytes = package.finish()?;

        log::debug!(
            "Rendered {} blocks into {} bytes of docx",
            doc.block_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn document_xml(&self, doc: &Document) -> Result<String> {
        let mut body = String::new();
        if let Some(ref title_page) = doc.title_page {
            render_title_page(&mut body, title_page, &doc.styles)?;
        }

        let mut previous_was_table = false;
        for block in &doc.blocks {
            // Adjacent tables would merge into one without a paragraph between.
            if previous_was_table && block.is_table() {
                body.push_str("<w:p/>");
            }
            render_block(&mut body, block, &doc.styles)?;
            previous_was_table = block.is_table();
        }

        let mut xml = String::from(XML_DECLARATION);
        let _ = write!(
            xml,
            r#"<w:document xmlns:w="{}" xmlns:r="{}"><w:body>{}{}</w:body></w:document>"#,
            NS_W,
            NS_R,
            body,
            section_properties(&self.options.page, doc.header.is_some())
        );
        Ok(xml)
    }
}

fn style_id(styles: &StyleRegistry, kind: StyleKind) -> Result<&str> {
    styles
        .get(kind)
        .map(|s| s.id.as_str())
        .ok_or_else(|| Error::Render(format!("no style registered for {:?}", kind)))
}

fn render_title_page(out: &mut String, title_page: &TitlePage, styles: &StyleRegistry) -> Result<()> {
    let title_style = style_id(styles, StyleKind::Title)?;
    let subtitle_size = styles
        .heading(1)
        .map(Style::half_points)
        .unwrap_or_default();

    out.push_str("<w:p/><w:p/>");
    let _ = write!(
        out,
        r#"<w:p><w:pPr><w:pStyle w:val="{}"/><w:jc w:val="center"/></w:pPr>{}</w:p>"#,
        title_style,
        text_run(&title_page.title, false)
    );
    let _ = write!(
        out,
        r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:rPr><w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape_xml(&title_page.subtitle),
        size = subtitle_size
    );
    out.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
    Ok(())
}

fn render_block(out: &mut String, block: &Block, styles: &StyleRegistry) -> Result<()> {
    match block {
        Block::Heading { level, text } => {
            let id = style_id(styles, StyleKind::Heading(*level))?;
            let _ = write!(
                out,
                r#"<w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>{}</w:p>"#,
                id,
                text_run(text, false)
            );
        }
        Block::Table(table) => render_table(out, table, styles)?,
    }
    Ok(())
}

fn render_table(out: &mut String, table: &Table, styles: &StyleRegistry) -> Result<()> {
    let header_style = style_id(styles, StyleKind::HeaderCell)?;
    let content_style = style_id(styles, StyleKind::ContentCell)?;

    let _ = write!(
        out,
        concat!(
            r#"<w:tbl><w:tblPr><w:tblW w:w="{}" w:type="dxa"/><w:tblBorders>"#,
            r#"<w:top w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#,
            r#"<w:left w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#,
            r#"<w:bottom w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#,
            r#"<w:right w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#,
            r#"<w:insideH w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#,
            r#"<w:insideV w:val="single" w:sz="4" w:space="0" w:color="000000"/>"#,
            r#"</w:tblBorders><w:tblLayout w:type="fixed"/></w:tblPr><w:tblGrid>"#
        ),
        table.total_width()
    );
    for width in &table.column_widths {
        let _ = write!(out, r#"<w:gridCol w:w="{}"/>"#, width);
    }
    out.push_str("</w:tblGrid>");

    for index in 0..table.row_count() {
        out.push_str("<w:tr>");
        for cell in table.physical_row(index) {
            let header = cell.style == CellStyle::Header;
            let _ = write!(out, r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/>"#, cell.width);
            match cell.merge {
                Merge::Restart => out.push_str(r#"<w:hMerge w:val="restart"/>"#),
                Merge::Continue => out.push_str(r#"<w:hMerge w:val="continue"/>"#),
                Merge::None => {}
            }
            if header {
                let _ = write!(
                    out,
                    r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
                    HEADER_FILL
                );
            }
            let _ = write!(
                out,
                r#"</w:tcPr><w:p><w:pPr><w:pStyle w:val="{}"/></w:pPr>{}</w:p></w:tc>"#,
                if header { header_style } else { content_style },
                cell.text.map(|t| line_runs(t, header)).unwrap_or_default()
            );
        }
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
    Ok(())
}

fn text_run(text: &str, bold: bool) -> String {
    let props = if bold { "<w:rPr><w:b/><w:bCs/></w:rPr>" } else { "" };
    format!(
        r#"<w:r>{}<w:t xml:space="preserve">{}</w:t></w:r>"#,
        props,
        escape_xml(text)
    )
}

/// One run per line, with a break run between lines.
fn line_runs(text: &str, bold: bool) -> String {
    let mut runs = String::new();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            runs.push_str("<w:r><w:br/></w:r>");
        }
        runs.push_str(&text_run(line.trim_end_matches('\r'), bold));
    }
    runs
}

fn section_properties(page: &PageSetup, has_header: bool) -> String {
    let header = if has_header {
        format!(
            r#"<w:headerReference w:type="default" r:id="{}"/>"#,
            HEADER_REL_ID
        )
    } else {
        String::new()
    };
    format!(
        concat!(
            r#"<w:sectPr>{}<w:pgSz w:w="{}" w:h="{}"/>"#,
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="0"/>"#,
            "</w:sectPr>"
        ),
        header,
        page.width,
        page.height,
        page.margin_top,
        page.margin_right,
        page.margin_bottom,
        page.margin_left,
        page.header,
        page.footer
    )
}

fn styles_xml(styles: &StyleRegistry) -> String {
    let mut xml = String::from(XML_DECLARATION);
    let _ = write!(
        xml,
        concat!(
            r#"<w:styles xmlns:w="{ns}"><w:docDefaults><w:rPrDefault><w:rPr>"#,
            r#"<w:rFonts w:ascii="{latin}" w:hAnsi="{latin}" w:eastAsia="{east}" w:cs="{latin}"/>"#,
            r#"<w:sz w:val="24"/><w:szCs w:val="24"/><w:lang w:val="en-US" w:eastAsia="zh-CN"/>"#,
            r#"</w:rPr></w:rPrDefault><w:pPrDefault/></w:docDefaults>"#,
            r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#
        ),
        ns = NS_W,
        latin = escape_xml(crate::model::FONT_LATIN),
        east = escape_xml(crate::model::FONT_EAST_ASIA)
    );
    for style in styles.iter() {
        write_style(&mut xml, style);
    }
    xml.push_str("</w:styles>");
    xml
}

fn write_style(xml: &mut String, style: &Style) {
    let heading = matches!(style.kind, StyleKind::Heading(_));
    let _ = write!(
        xml,
        r#"<w:style w:type="paragraph" w:customStyle="1" w:styleId="{}"><w:name w:val="{}"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr>"#,
        escape_xml(&style.id),
        escape_xml(&style.name)
    );
    if heading {
        xml.push_str("<w:keepNext/><w:keepLines/>");
    }
    let _ = write!(
        xml,
        r#"<w:spacing w:before="{}" w:after="{}"/>"#,
        style.spacing_before, style.spacing_after
    );
    if style.kind == StyleKind::Title {
        xml.push_str(r#"<w:jc w:val="center"/>"#);
    }
    if let Some(level) = style.outline_level {
        let _ = write!(xml, r#"<w:outlineLvl w:val="{}"/>"#, level);
    }
    let _ = write!(
        xml,
        r#"</w:pPr><w:rPr><w:rFonts w:ascii="{latin}" w:hAnsi="{latin}" w:eastAsia="{east}" w:cs="{latin}"/>"#,
        latin = escape_xml(style.font_latin),
        east = escape_xml(style.font_east_asia)
    );
    if style.bold {
        xml.push_str("<w:b/><w:bCs/>");
    }
    let _ = write!(
        xml,
        r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/></w:rPr></w:style>"#,
        size = style.half_points()
    );
}

fn header_xml(text: &str) -> String {
    format!(
        concat!(
            "{}",
            r#"<w:hdr xmlns:w="{}"><w:p><w:pPr><w:jc w:val="center"/></w:pPr>"#,
            r#"<w:r><w:rPr><w:sz w:val="18"/><w:szCs w:val="18"/></w:rPr><w:t xml:space="preserve">{}</w:t></w:r>"#,
            "</w:p></w:hdr>"
        ),
        XML_DECLARATION,
        NS_W,
        escape_xml(text)
    )
}

fn content_types(has_header: bool) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
        r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#
    ));
    if has_header {
        xml.push_str(r#"<Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>"#);
    }
    xml.push_str("</Types>");
    xml
}

fn document_rels(has_header: bool) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#
    ));
    if has_header {
        let _ = write!(
            xml,
            r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/header" Target="header1.xml"/>"#,
            HEADER_REL_ID
        );
    }
    xml.push_str("</Relationships>");
    xml
}
