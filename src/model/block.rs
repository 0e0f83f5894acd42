//! Block-level document elements.

use super::Table;
use serde::{Deserialize, Serialize};

/// Deepest heading level with a registered style.
pub const MAX_HEADING_LEVEL: u8 = 7;

/// A content block of the document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading rendered with one of the heading styles
    Heading {
        /// Heading level (1-7)
        level: u8,
        /// Heading text
        text: String,
    },

    /// A table
    Table(Table),
}

impl Block {
    /// Create a heading block, clamping the level to the styled range.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level: level.clamp(1, MAX_HEADING_LEVEL),
            text: text.into(),
        }
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading { .. })
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Get the table if this is a table block.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Get heading level and text if this is a heading block.
    pub fn as_heading(&self) -> Option<(u8, &str)> {
        match self {
            Block::Heading { level, text } => Some((*level, text)),
            _ => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading { text, .. } => text.clone(),
            Block::Table(t) => t.plain_text(),
        }
    }
}
