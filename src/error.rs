use thiserror::Error;

/// Failure of a backend request, as seen by the action that triggered it.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    /// The backend answered but reported a logical failure.
    #[error("{0}")]
    Backend(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("request superseded")]
    Aborted,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markdown conversion failed: {0}")]
    Conversion(#[from] std::fmt::Error),
}

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("diagram renderer failed to start: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("diagram syntax error: {0}")]
    Syntax(String),

    #[error("diagram renderer produced no output")]
    EmptyOutput,
}
