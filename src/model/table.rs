//! Table types.
//!
//! A [`Table`] stores logical cells: a cell spanning three columns is one
//! [`TableCell`] with `span = 3`. Renderers expand rows into physical grid
//! cells through [`Table::physical_row`], which allocates every grid cell of
//! the row before applying merge markers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A table with an explicit shape and column widths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Declared number of rows
    pub rows: usize,

    /// Declared number of grid columns
    pub cols: usize,

    /// Column widths in twips (1/20 point), one per grid column
    pub column_widths: Vec<u32>,

    /// Rows of logical cells
    pub cells: Vec<TableRow>,
}

impl Table {
    /// Start building a table of the given shape.
    pub fn builder(rows: usize, cols: usize) -> TableBuilder {
        TableBuilder::new(rows, cols)
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Get the number of grid columns.
    pub fn column_count(&self) -> usize {
        self.cols
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a row by index.
    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.cells.get(index)
    }

    /// Total width of the grid columns `start..start + span`.
    pub fn span_width(&self, start: usize, span: usize) -> u32 {
        self.column_widths.iter().skip(start).take(span).sum()
    }

    /// Total table width.
    pub fn total_width(&self) -> u32 {
        self.column_widths.iter().sum()
    }

    /// Check if any cell spans more than one column.
    pub fn has_merged_cells(&self) -> bool {
        self.cells
            .iter()
            .flat_map(|r| &r.cells)
            .any(TableCell::is_merged)
    }

    /// Expand a row into its physical grid cells.
    ///
    /// All `cols` cells are allocated first; merge markers are applied after.
    pub fn physical_row(&self, index: usize) -> Vec<PhysicalCell<'_>> {
        let mut grid: Vec<PhysicalCell<'_>> = self
            .column_widths
            .iter()
            .take(self.cols)
            .map(|&width| PhysicalCell {
                text: None,
                style: CellStyle::Content,
                merge: Merge::None,
                width,
            })
            .collect();

        let Some(row) = self.cells.get(index) else {
            return grid;
        };

        let mut col = 0;
        for cell in &row.cells {
            let span = cell.span.max(1) as usize;
            if col >= grid.len() {
                break;
            }
            grid[col].text = Some(cell.text.as_str());
            grid[col].style = cell.style;
            if span > 1 {
                grid[col].merge = Merge::Restart;
                for covered in grid.iter_mut().skip(col + 1).take(span - 1) {
                    covered.merge = Merge::Continue;
                    covered.style = cell.style;
                }
            }
            col += span;
        }
        grid
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A table row of logical cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Number of grid columns this row covers.
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.span.max(1) as usize).sum()
    }

    /// Get plain text representation.
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text.replace('\n', " "))
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// Visual role of a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellStyle {
    /// Shaded, bold label cell
    Header,
    /// Plain content cell
    #[default]
    Content,
}

/// A logical table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell text; `\n` separates visual lines
    pub text: String,

    /// Visual role
    pub style: CellStyle,

    /// Number of grid columns this cell spans
    pub span: u16,
}

impl TableCell {
    /// Create a content cell.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: CellStyle::Content,
            span: 1,
        }
    }

    /// Create a header cell.
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            style: CellStyle::Header,
            ..Self::text(text)
        }
    }

    /// Set the span and return self.
    pub fn span(mut self, span: u16) -> Self {
        self.span = span.max(1);
        self
    }

    /// Lines of the cell text.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Check if this cell spans multiple columns.
    pub fn is_merged(&self) -> bool {
        self.span > 1
    }

    /// Check if this is a header cell.
    pub fn is_header(&self) -> bool {
        self.style == CellStyle::Header
    }
}

/// Horizontal merge marker of a physical grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// Not part of a merge
    None,
    /// First physical cell of a span; carries the text
    Restart,
    /// Covered by the span started to its left
    Continue,
}

/// A physical grid cell produced by [`Table::physical_row`].
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalCell<'a> {
    /// Text for cells that start a logical cell
    pub text: Option<&'a str>,
    /// Visual role
    pub style: CellStyle,
    /// Merge marker
    pub merge: Merge,
    /// Grid column width in twips
    pub width: u32,
}

/// Builder that owns a table under construction.
///
/// Rows are filled left to right; [`TableBuilder::finish`] checks that every
/// declared row and column was written.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    rows: usize,
    cols: usize,
    column_widths: Vec<u32>,
    cells: Vec<TableRow>,
}

impl TableBuilder {
    /// Default table width in twips (A4 minus standard margins).
    pub const DEFAULT_WIDTH: u32 = 8732;

    /// Create a builder with evenly distributed widths.
    pub fn new(rows: usize, cols: usize) -> Self {
        let even = if cols == 0 {
            0
        } else {
            Self::DEFAULT_WIDTH / cols as u32
        };
        Self {
            rows,
            cols,
            column_widths: vec![even; cols],
            cells: vec![TableRow::default()],
        }
    }

    /// Set explicit column widths in twips.
    pub fn widths(mut self, widths: &[u32]) -> Self {
        self.column_widths = widths.to_vec();
        self
    }

    /// Append a content cell to the current row.
    pub fn cell(self, text: impl Into<String>) -> Self {
        self.push(TableCell::text(text))
    }

    /// Append a header cell to the current row.
    pub fn header_cell(self, text: impl Into<String>) -> Self {
        self.push(TableCell::header(text))
    }

    /// Append a header/content pair to the current row.
    pub fn kv(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_cell(key).cell(value)
    }

    /// Append a cell spanning `span` grid columns.
    pub fn merged_cell(self, text: impl Into<String>, span: u16, style: CellStyle) -> Self {
        let cell = TableCell {
            text: text.into(),
            style,
            span: span.max(1),
        };
        self.push(cell)
    }

    /// Start the next row.
    pub fn new_row(mut self) -> Self {
        self.cells.push(TableRow::default());
        self
    }

    /// Append a pre-built cell.
    pub fn push(mut self, cell: TableCell) -> Self {
        if let Some(row) = self.cells.last_mut() {
            row.cells.push(cell);
        }
        self
    }

    /// Validate the shape and produce the table.
    pub fn finish(self) -> Result<Table> {
        if self.column_widths.len() != self.cols {
            return Err(Error::Layout(format!(
                "{} column widths given for {} columns",
                self.column_widths.len(),
                self.cols
            )));
        }
        if self.cells.len() != self.rows {
            return Err(Error::Layout(format!(
                "table declared {} rows but {} were written",
                self.rows,
                self.cells.len()
            )));
        }
        if let Some((index, row)) = self
            .cells
            .iter()
            .enumerate()
            .find(|(_, row)| row.width() != self.cols)
        {
            return Err(Error::Layout(format!(
                "row {} covers {} columns, expected {}",
                index,
                row.width(),
                self.cols
            )));
        }

        Ok(Table {
            rows: self.rows,
            cols: self.cols,
            column_widths: self.column_widths,
            cells: self.cells,
        })
    }
}
