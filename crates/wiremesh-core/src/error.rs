use thiserror::Error;

/// Result type alias for wiremesh operations
pub type Result<T> = std::result::Result<T, WiremeshError>;

/// Errors that can occur in the control-plane client core
#[derive(Error, Debug)]
pub enum WiremeshError {
    /// No coordination server URL was supplied
    #[error("server URL is required")]
    MissingServerUrl,

    /// The coordination server URL could not be parsed
    #[error("invalid server URL {url:?}: {reason}")]
    InvalidServerUrl {
        /// The URL as supplied
        url: String,
        /// Parse failure detail
        reason: String,
    },

    /// The machine private key could not be retrieved
    #[error("machine key unavailable: {0}")]
    Key(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WiremeshError {
    /// Returns true if the error makes session start impossible
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::MissingServerUrl | Self::InvalidServerUrl { .. } | Self::Key(_)
        )
    }
}
