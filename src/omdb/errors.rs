//! Error types for the OMDb client.

/// Transport-level failure of a single catalog request.
///
/// Remote failures reported inside a well-formed payload (`"Response": "False"`)
/// are not errors at this layer; they come back as payloads.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("server returned {status}")]
    Status { status: u16, url: String },
    #[error("failed to parse response")]
    ParseFailed {
        url: String,
        #[source]
        source: anyhow::Error,
    },
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// HTTP status for non-2xx responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest_middleware::Error> for FetchError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => Self::Transport(e),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            // the URL carries the API key
            Self::Transport(err.without_url().into())
        }
    }
}
