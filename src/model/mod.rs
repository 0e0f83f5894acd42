//! Document model types.
//!
//! This module defines the intermediate representation that bridges the
//! document builders and the binary renderers. The model is format-agnostic:
//! headings and tables with explicit widths and spans.

mod block;
mod document;
mod style;
mod table;
mod workbook;

pub use block::{Block, MAX_HEADING_LEVEL};
pub use document::{Document, Metadata, TitlePage};
pub use style::{
    Style, StyleKind, StyleRegistry, FONT_EAST_ASIA, FONT_LATIN, FONT_SIZE_H1, FONT_SIZE_H2,
    FONT_SIZE_NORMAL, FONT_SIZE_SMALL, FONT_SIZE_TITLE,
};
pub use table::{CellStyle, Merge, PhysicalCell, Table, TableBuilder, TableCell, TableRow};
pub use workbook::{
    cell_ref, column_letters, unique_sheet_name, MergeRange, Sheet, SheetCell, SheetStyle,
    Workbook,
};
