//! Stats service error type

/// Broad failure category, used for logging only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Protocol,
    Application,
}

/// Any failed call to the stats service.
///
/// Callers treat every variant the same way; the variants exist so the logs
/// say what went wrong.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status code.
    #[error("Stats service returned HTTP {0}")]
    Status(u16),

    /// The body was not the JSON shape we expect.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Well-formed response with `success: false`.
    #[error("Stats service rejected {endpoint}")]
    Rejected { endpoint: &'static str },
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Status(_) | Self::Decode(_) => ErrorKind::Protocol,
            Self::Rejected { .. } => ErrorKind::Application,
        }
    }
}
