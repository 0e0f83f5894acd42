//! Rendering module for serializing documents and workbooks.
//!
//! `docx` and `xlsx` produce the binary containers; `json` and `text` are
//! diagnostic views of the same document tree.

pub mod docx;
mod json;
mod options;
mod package;
mod text;
pub mod xlsx;

pub use docx::{to_docx, write_docx, DocxRenderer};
pub use json::{to_json, JsonFormat};
pub use options::{PageSetup, RenderOptions, TextTableStyle};
pub use package::write_output;
pub use text::to_text;
pub use xlsx::{to_xlsx, write_xlsx};
