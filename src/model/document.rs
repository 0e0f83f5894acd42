//! Document-level types.

use super::{Block, StyleRegistry, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An abstract document: metadata, an optional title page and header, and
/// an ordered block sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, author, etc.)
    pub metadata: Metadata,

    /// Title page shown before the body
    pub title_page: Option<TitlePage>,

    /// Running header text
    pub header: Option<String>,

    /// Body blocks in output order
    pub blocks: Vec<Block>,

    /// Styles referenced by the blocks
    #[serde(skip)]
    pub styles: StyleRegistry,
}

impl Document {
    /// Create a new empty document with the standard style set.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            title_page: None,
            header: None,
            blocks: Vec::new(),
            styles: StyleRegistry::standard(),
        }
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Get the number of body blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterate over headings as (level, text).
    pub fn headings(&self) -> impl Iterator<Item = (u8, &str)> {
        self.blocks.iter().filter_map(Block::as_heading)
    }

    /// Iterate over tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref title_page) = self.title_page {
            parts.push(title_page.title.clone());
            parts.push(title_page.subtitle.clone());
        }
        parts.extend(
            self.blocks
                .iter()
                .map(Block::plain_text)
                .filter(|t| !t.is_empty()),
        );
        parts.join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata written to the container's core properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Title page content, followed by a forced page break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePage {
    /// Main title
    pub title: String,

    /// Subtitle line
    pub subtitle: String,
}

impl TitlePage {
    /// Create a title page.
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}
