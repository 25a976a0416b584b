/// Errors returned by storage backends
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// Destination URI uses a scheme with no backend
    #[error("unsupported storage scheme '{0}'")]
    UnsupportedScheme(String),

    /// Destination could not be turned into a backend
    #[error("invalid storage destination '{destination}': {reason}")]
    InvalidDestination {
        /// Destination as configured
        destination: String,
        /// What was wrong with it
        reason: String,
    },

    /// Object name is empty or escapes the destination
    #[error("invalid object name '{0}'")]
    InvalidPath(String),

    /// Filesystem write failed
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be encoded as JSON
    #[error("failed to encode payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport or connection error
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage service returned a non-success status
    #[error("storage API error ({status}): {body}")]
    Status {
        /// HTTP status from the service
        status: u16,
        /// Response body
        body: String,
    },
}
