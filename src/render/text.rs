//! Plain-text preview of a document.

use crate::error::Result;
use crate::model::{Block, Document, Table};

use super::{RenderOptions, TextTableStyle};

/// Convert a document to plain text.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    if let Some(ref title_page) = doc.title_page {
        output.push_str(&title_page.title);
        output.push('\n');
        output.push_str(&title_page.subtitle);
        output.push_str("\n\n");
    }

    for block in &doc.blocks {
        match block {
            Block::Heading { level, text } => {
                output.push_str(text);
                output.push('\n');
                match level {
                    1 => output.push_str(&"=".repeat(text.chars().count())),
                    2 => output.push_str(&"-".repeat(text.chars().count())),
                    _ => {}
                }
                if *level <= 2 {
                    output.push('\n');
                }
            }
            Block::Table(table) => render_table(&mut output, table, options.text_tables),
        }
        output.push('\n');
    }

    Ok(output.trim().to_string())
}

fn render_table(output: &mut String, table: &Table, style: TextTableStyle) {
    let separator = match style {
        TextTableStyle::Tabs => "\t",
        TextTableStyle::Pipes => " | ",
    };
    for row in &table.cells {
        let line = row
            .cells
            .iter()
            .map(|c| c.text.replace('\n', " "))
            .collect::<Vec<_>>()
            .join(separator);
        output.push_str(&line);
        output.push('\n');
    }
}
