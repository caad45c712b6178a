pub mod error;
pub mod markdown;
pub mod sanitize;

pub use error::RenderError;
pub use markdown::{MarkdownWriter, render_markdown};
pub use sanitize::sanitize_filename;

use std::path::PathBuf;

use questlog_core::{CatalogEntry, ResolvedRecord};

/// Trait for document renderers that persist one resolved game.
pub trait Renderer {
    /// Render and persist the document for an entry.
    ///
    /// Returns the location the document was written to.
    fn render(&self, entry: &CatalogEntry, record: &ResolvedRecord)
    -> Result<PathBuf, RenderError>;
}
