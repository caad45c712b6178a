/// Terminal classification of processing one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingOutcome {
    /// A document was rendered for the entry.
    Succeeded,
    /// The service had no usable data for the entry.
    Unmatched(String),
    /// Processing raised an error (transport, resolution or render).
    Failed(String),
}

/// Outcome without its reason, for counting and report columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Succeeded,
    Unmatched,
    Failed,
}

impl ProcessingOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Succeeded => OutcomeKind::Succeeded,
            Self::Unmatched(_) => OutcomeKind::Unmatched,
            Self::Failed(_) => OutcomeKind::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Reason string for non-successful outcomes.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Succeeded => None,
            Self::Unmatched(reason) | Self::Failed(reason) => Some(reason),
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeKind::Succeeded => write!(f, "succeeded"),
            OutcomeKind::Unmatched => write!(f, "unmatched"),
            OutcomeKind::Failed => write!(f, "failed"),
        }
    }
}
