//! Fixed style sheet shared by every generated document.

use super::block::MAX_HEADING_LEVEL;

/// East-Asian font used throughout.
pub const FONT_EAST_ASIA: &str = "仿宋_GB2312";
/// Latin font used throughout.
pub const FONT_LATIN: &str = "Times New Roman";

/// Title size in points.
pub const FONT_SIZE_TITLE: u8 = 22;
/// Level-1 heading size in points.
pub const FONT_SIZE_H1: u8 = 16;
/// Level-2 heading size in points.
pub const FONT_SIZE_H2: u8 = 14;
/// Body size in points.
pub const FONT_SIZE_NORMAL: u8 = 12;
/// Table and minor heading size in points.
pub const FONT_SIZE_SMALL: u8 = 10;

/// Spacing before headings, in twips.
pub const HEADING_SPACING_BEFORE: u32 = 12 * 20;
/// Spacing after headings, in twips.
pub const HEADING_SPACING_AFTER: u32 = 8 * 20;

/// Role of a style in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// Title page lines
    Title,
    /// Heading of the given level (1-7)
    Heading(u8),
    /// Table header cell
    HeaderCell,
    /// Table content cell
    ContentCell,
}

/// A named paragraph/run style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Role
    pub kind: StyleKind,
    /// Style id written into the container
    pub id: String,
    /// Display name
    pub name: String,
    /// Font for east-Asian glyphs
    pub font_east_asia: &'static str,
    /// Font for Latin glyphs
    pub font_latin: &'static str,
    /// Size in points
    pub size_pt: u8,
    /// Paragraph spacing before, in twips
    pub spacing_before: u32,
    /// Paragraph spacing after, in twips
    pub spacing_after: u32,
    /// Zero-based outline level for table-of-contents tooling
    pub outline_level: Option<u8>,
    /// Bold weight
    pub bold: bool,
}

impl Style {
    /// Size in half-points as stored by WordprocessingML.
    pub fn half_points(&self) -> u32 {
        u32::from(self.size_pt) * 2
    }
}

/// The fixed style set: title, seven headings, header and content cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRegistry {
    styles: Vec<Style>,
}

impl StyleRegistry {
    /// Build the standard style set.
    pub fn standard() -> Self {
        let mut styles = vec![Style {
            kind: StyleKind::Title,
            id: "Title".to_string(),
            name: "Title".to_string(),
            font_east_asia: FONT_EAST_ASIA,
            font_latin: FONT_LATIN,
            size_pt: FONT_SIZE_TITLE,
            spacing_before: 0,
            spacing_after: 0,
            outline_level: None,
            bold: false,
        }];

        for level in 1..=MAX_HEADING_LEVEL {
            let size_pt = match level {
                1 => FONT_SIZE_H1,
                2 => FONT_SIZE_H2,
                3 | 4 => FONT_SIZE_NORMAL,
                _ => FONT_SIZE_SMALL,
            };
            styles.push(Style {
                kind: StyleKind::Heading(level),
                id: format!("Heading{}", level),
                name: format!("heading {}", level),
                font_east_asia: FONT_EAST_ASIA,
                font_latin: FONT_LATIN,
                size_pt,
                spacing_before: HEADING_SPACING_BEFORE,
                spacing_after: HEADING_SPACING_AFTER,
                outline_level: Some(level - 1),
                bold: true,
            });
        }

        styles.push(Style {
            kind: StyleKind::HeaderCell,
            id: "TableHeader".to_string(),
            name: "Table Header".to_string(),
            font_east_asia: FONT_EAST_ASIA,
            font_latin: FONT_LATIN,
            size_pt: FONT_SIZE_SMALL,
            spacing_before: 0,
            spacing_after: 0,
            outline_level: None,
            bold: true,
        });
        styles.push(Style {
            kind: StyleKind::ContentCell,
            id: "TableContent".to_string(),
            name: "Table Content".to_string(),
            font_east_asia: FONT_EAST_ASIA,
            font_latin: FONT_EAST_ASIA,
            size_pt: FONT_SIZE_SMALL,
            spacing_before: 0,
            spacing_after: 0,
            outline_level: None,
            bold: false,
        });

        Self { styles }
    }

    /// Look up a style by role.
    pub fn get(&self, kind: StyleKind) -> Option<&Style> {
        self.styles.iter().find(|s| s.kind == kind)
    }

    /// Heading style for a level.
    pub fn heading(&self, level: u8) -> Option<&Style> {
        self.get(StyleKind::Heading(level))
    }

    /// Iterate over all styles.
    pub fn iter(&self) -> impl Iterator<Item = &Style> {
        self.styles.iter()
    }

    /// Number of registered styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
