//! The one error type API callers see.
//!
//! Every variant's `Display` is a finished, human-readable message. Views
//! print it as-is; nothing downstream inspects transport details.

/// Errors produced by [`ApiService`](super::ApiService) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A success-looking response was an HTML page, usually a dev server or
    /// reverse proxy answering in place of the API.
    #[error(
        "Backend not reachable: the server answered with an HTML page instead of JSON. Check that API_URL points to the API server."
    )]
    MisconfiguredServer,

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A 2xx body that is not the expected JSON.
    #[error("Malformed server response: expected valid JSON.")]
    MalformedPayload,

    /// The backend could not be reached at all.
    #[error("Cannot connect to the backend server. Make sure it is running and reachable.")]
    Connectivity,

    /// The HTTP client or a header value could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

impl ApiError {
    /// HTTP status for [`ApiError::Status`], `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
