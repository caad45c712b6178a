use crate::report::GenerateReport;

/// Errors that can occur while talking to IGDB or running a generation.
#[derive(Debug, thiserror::Error)]
pub enum IgdbError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token exchange rejected (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    #[error("Credential store error: {0}")]
    CredentialStore(String),

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("IGDB request failed (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Resolution failed: {0}")]
    Resolution(String),

    #[error("Render failed: {0}")]
    Render(#[from] questlog_render::RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl IgdbError {
    /// Errors after which no further request can succeed.
    ///
    /// Generation aborts on these instead of recording a per-entry failure.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IgdbError::Configuration(_) | IgdbError::Auth { .. } | IgdbError::CredentialStore(_)
        )
    }
}

/// A generation run stopped by a fatal error.
///
/// Carries the outcomes gathered so far, including the entry that hit the
/// error, so the follow-up report can still be written.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct GenerateAborted {
    pub report: GenerateReport,
    #[source]
    pub error: IgdbError,
}
