use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Catalog {
        path: String,
        #[source]
        source: questlog_core::CatalogError,
    },

    /// IGDB, auth or configuration failure
    #[error("{0}")]
    Igdb(#[from] questlog_igdb::IgdbError),

    /// Document rendering failed
    #[error("{0}")]
    Render(#[from] questlog_render::RenderError),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl CliError {
    pub(crate) fn catalog(path: &std::path::Path, source: questlog_core::CatalogError) -> Self {
        Self::Catalog {
            path: path.display().to_string(),
            source,
        }
    }

    /// Missing or invalid IGDB client settings.
    pub(crate) fn is_configuration(&self) -> bool {
        matches!(self, Self::Igdb(questlog_igdb::IgdbError::Configuration(_)))
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }
}
