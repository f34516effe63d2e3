use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// The HTTP client could not be configured; no request was attempted.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// No response was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{}", .message.as_deref().unwrap_or("resource not found"))]
    NotFound { message: Option<String> },
    #[error("{}", describe_status(.status, .message.as_deref()))]
    Server {
        status: u16,
        message: Option<String>,
    },
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn from_status(status: StatusCode, body: &[u8]) -> Self {
        let message = extract_message(body);
        if status == StatusCode::NOT_FOUND {
            Self::NotFound { message }
        } else {
            Self::Server {
                status: status.as_u16(),
                message,
            }
        }
    }

    /// Human-readable message supplied by the server, if the body carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::NotFound { message } | Self::Server { message, .. } => message.as_deref(),
            Self::Url(_) | Self::Client(_) | Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn describe_status(status: &u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("request failed with status {status}"),
    }
}

/// Pull `message` (or `error`) out of a JSON error body.
pub(crate) fn extract_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|field| value.get(field).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(ToString::to_string)
}
