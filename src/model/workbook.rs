//! Spreadsheet model for the database workbook variant.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Longest sheet name accepted by spreadsheet applications.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// A workbook of named sheets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    /// Sheets in tab order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sheet, making its name valid and unique.
    pub fn add_sheet(&mut self, mut sheet: Sheet) {
        let taken: Vec<&str> = self.sheets.iter().map(|s| s.name.as_str()).collect();
        sheet.name = unique_sheet_name(&sheet.name, &taken);
        self.sheets.push(sheet);
    }

    /// Get a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }
}

/// Cell formatting role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetStyle {
    /// Bold, centered label of a table header block
    Title,
    /// Bold, centered column header
    Header,
    /// Plain content
    #[default]
    Content,
}

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetCell {
    /// Cell text
    pub text: String,
    /// Formatting role
    pub style: SheetStyle,
}

/// A rectangular merged region, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRange {
    /// First row (0-based)
    pub first_row: usize,
    /// Last row (0-based, inclusive)
    pub last_row: usize,
    /// First column (0-based)
    pub first_col: usize,
    /// Last column (0-based, inclusive)
    pub last_col: usize,
}

impl MergeRange {
    /// Create a merge range.
    pub fn new(first_row: usize, last_row: usize, first_col: usize, last_col: usize) -> Self {
        Self {
            first_row,
            last_row,
            first_col,
            last_col,
        }
    }

    /// A1-style reference, e.g. `A2:A4`.
    pub fn to_a1(&self) -> String {
        format!(
            "{}:{}",
            cell_ref(self.first_row, self.first_col),
            cell_ref(self.last_row, self.last_col)
        )
    }
}

/// A sheet: sparse grid of cells plus column widths and merges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// Column widths in 1/256 character units
    pub column_widths: Vec<u32>,
    /// Rows; `None` cells are left blank
    pub rows: Vec<Vec<Option<SheetCell>>>,
    /// Merged regions
    pub merges: Vec<MergeRange>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: impl Into<String>, column_widths: &[u32]) -> Self {
        Self {
            name: name.into(),
            column_widths: column_widths.to_vec(),
            rows: Vec::new(),
            merges: Vec::new(),
        }
    }

    /// Append an empty row and return its index.
    pub fn add_row(&mut self) -> usize {
        self.rows.push(vec![None; self.column_widths.len()]);
        self.rows.len() - 1
    }

    /// Set a cell; the row must exist and the column must be in range.
    pub fn set(&mut self, row: usize, col: usize, text: impl Into<String>, style: SheetStyle) {
        if let Some(cells) = self.rows.get_mut(row) {
            if col >= cells.len() {
                cells.resize(col + 1, None);
            }
            cells[col] = Some(SheetCell {
                text: text.into(),
                style,
            });
        }
    }

    /// Get a cell.
    pub fn get(&self, row: usize, col: usize) -> Option<&SheetCell> {
        self.rows.get(row)?.get(col)?.as_ref()
    }

    /// Register a merged region; it must lie inside the grid.
    pub fn merge(&mut self, range: MergeRange) -> Result<()> {
        let inside = range.first_row <= range.last_row
            && range.first_col <= range.last_col
            && range.last_row < self.rows.len()
            && range.last_col < self.column_widths.len();
        if !inside {
            return Err(Error::Layout(format!(
                "merge {} outside sheet {}",
                range.to_a1(),
                self.name
            )));
        }
        self.merges.push(range);
        Ok(())
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A1-style cell reference for 0-based coordinates.
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

/// Spreadsheet column letters for a 0-based index (`0 → A`, `26 → AA`).
pub fn column_letters(mut col: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Make a sheet name valid and distinct from `taken`.
pub fn unique_sheet_name(name: &str, taken: &[&str]) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches('\'').trim();
    let base: String = if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned.chars().take(MAX_SHEET_NAME_LEN).collect()
    };

    let is_taken = |candidate: &str| taken.iter().any(|t| t.eq_ignore_ascii_case(candidate));
    if !is_taken(&base) {
        return base;
    }
    (2..)
        .map(|n| {
            let suffix = format!(" ({})", n);
            let keep = MAX_SHEET_NAME_LEN.saturating_sub(suffix.chars().count());
            format!("{}{}", base.chars().take(keep).collect::<String>(), suffix)
        })
        .find(|candidate| !is_taken(candidate))
        .unwrap_or(base)
}
