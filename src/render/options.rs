//! Rendering options and configuration.

/// A4 width in twips.
pub const A4_WIDTH: u32 = 11906;
/// A4 height in twips.
pub const A4_HEIGHT: u32 = 16838;

/// Options for rendering documents and workbooks.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page geometry of document output
    pub page: PageSetup,

    /// Deflate container entries (stored uncompressed otherwise)
    pub compress: bool,

    /// Table layout of plain-text output
    pub text_tables: TextTableStyle,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page setup.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Enable or disable compression.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Set the plain-text table layout.
    pub fn with_text_tables(mut self, style: TextTableStyle) -> Self {
        self.text_tables = style;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page: PageSetup::default(),
            compress: true,
            text_tables: TextTableStyle::Tabs,
        }
    }
}

/// How tables appear in plain-text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextTableStyle {
    /// Cells separated by tabs
    #[default]
    Tabs,
    /// Cells separated by ` | `
    Pipes,
}

/// Page size and margins, in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSetup {
    /// Page width
    pub width: u32,
    /// Page height
    pub height: u32,
    /// Top margin
    pub margin_top: u32,
    /// Bottom margin
    pub margin_bottom: u32,
    /// Left margin
    pub margin_left: u32,
    /// Right margin
    pub margin_right: u32,
    /// Distance from the page edge to the header
    pub header: u32,
    /// Distance from the page edge to the footer
    pub footer: u32,
}

impl PageSetup {
    /// A4 portrait with the standard document margins.
    pub fn a4() -> Self {
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_top: 2097,
            margin_bottom: 2097,
            margin_left: 1587,
            margin_right: 1587,
            header: 851,
            footer: 992,
        }
    }

    /// Width available to body content.
    pub fn content_width(&self) -> u32 {
        self.width
            .saturating_sub(self.margin_left)
            .saturating_sub(self.margin_right)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}
