use std::path::PathBuf;

/// Errors raised while resolving shows and organizing season folders.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    #[error("No tvshow.nfo found at {0}")]
    MissingSidecar(PathBuf),

    #[error("Season folder not detected: {0}")]
    SeasonNotDetected(String),

    #[error("Year doesn't match: expected {expected}, provider has {found}")]
    YearMismatch { expected: String, found: String },

    #[error("No exact match for '{title}' ({year})")]
    NoExactMatch { title: String, year: String },

    #[error("Metadata provider error: {0}")]
    Provider(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid tvshow.nfo: {0}")]
    Sidecar(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, OrganizeError>;

impl OrganizeError {
    /// Ambiguous-match errors skip the folder instead of failing the run.
    pub fn is_ambiguous_match(&self) -> bool {
        matches!(
            self,
            OrganizeError::YearMismatch { .. } | OrganizeError::NoExactMatch { .. }
        )
    }
}
