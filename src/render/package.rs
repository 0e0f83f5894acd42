//! Zip packaging shared by the docx and xlsx writers.

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::model::Metadata;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";

/// An in-memory zip container.
pub(crate) struct Package {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl Package {
    pub(crate) fn new(compress: bool) -> Self {
        let method = if compress {
            CompressionMethod::Deflated
        } else {
            CompressionMethod::Stored
        };
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(method),
        }
    }

    /// Add a part.
    pub(crate) fn add(&mut self, name: &str, content: &str) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Add the package-level relationships and document properties.
    pub(crate) fn add_package_parts(&mut self, main_part: &str, metadata: &Metadata) -> Result<()> {
        let rels = format!(
            concat!(
                "{}",
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
                r#"<Relationship Id="rId1" Type="{}" Target="{}"/>"#,
                r#"<Relationship Id="rId2" Type="{}" Target="docProps/core.xml"/>"#,
                r#"<Relationship Id="rId3" Type="{}" Target="docProps/app.xml"/>"#,
                "</Relationships>"
            ),
            XML_DECLARATION,
            REL_OFFICE_DOCUMENT,
            main_part,
            REL_CORE_PROPERTIES,
            REL_EXTENDED_PROPERTIES
        );
        self.add("_rels/.rels", &rels)?;
        self.add("docProps/core.xml", &core_properties(metadata))?;
        self.add("docProps/app.xml", &app_properties())?;
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

fn core_properties(metadata: &Metadata) -> String {
    let mut xml = String::from(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties""#,
        r#" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/""#,
        r#" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    let fields = [
        ("dc:title", &metadata.title),
        ("dc:subject", &metadata.subject),
        ("dc:creator", &metadata.creator),
    ];
    for (tag, value) in fields {
        if let Some(value) = value {
            xml.push_str(&format!("<{tag}>{}</{tag}>", escape_xml(value)));
        }
    }
    if let Some(created) = metadata.created {
        xml.push_str(&format!(
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            created.format("%Y-%m-%dT%H:%M:%SZ")
        ));
    }
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_properties() -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
            "<Application>specdoc</Application><AppVersion>{}</AppVersion></Properties>"
        ),
        XML_DECLARATION,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape text for XML content and attribute values, dropping characters
/// XML 1.0 cannot carry.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '\t' | '\n' | '\r' => result.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
            c => result.push(c),
        }
    }
    result
}

/// Write a rendered container to `path` in one step.
///
/// Bytes go to a sibling `.part` file that is renamed into place; on any
/// failure the partial file is removed and the error returned.
pub fn write_output<P: AsRef<Path>>(path: P, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let partial = partial_path(path);
    let result = fs::write(&partial, bytes).and_then(|()| fs::rename(&partial, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&partial);
        return Err(Error::Io(e));
    }
    log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".part");
    path.with_file_name(name)
}
