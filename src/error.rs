// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Decode(String),
    Config(String),
    Http(HttpError),
    /// The server rejected the session token, or no token is held.
    Auth(String),
}

/// Failures talking to the gallery server.
/// Used to pick a short user-facing message for inline errors and toasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    /// Connection refused, DNS failure, timeout.
    Unreachable(String),

    /// The server answered with a non-success status.
    Status { code: u16, message: String },

    /// The body could not be parsed into the expected shape.
    InvalidResponse(String),
}

impl HttpError {
    /// Builds a status error, preferring the server's `{"error": "..."}` body
    /// when it has one.
    pub fn from_status(code: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|e| e.as_str())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| body.trim().to_string());
        HttpError::Status { code, message }
    }

    /// Whether the status means the session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, HttpError::Status { code: 401 | 403, .. })
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpError::Unreachable(msg) => write!(f, "Server unreachable: {}", msg),
            HttpError::Status { code, message } if message.is_empty() => {
                write!(f, "Server returned status {}", code)
            }
            HttpError::Status { code, message } => {
                write!(f, "Server returned status {}: {}", code, message)
            }
            HttpError::InvalidResponse(msg) => write!(f, "Invalid server response: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Http(e) => write!(f, "HTTP Error: {}", e),
            Error::Auth(e) => write!(f, "Auth Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// True when the failure should send the user back to the login screen.
    pub fn is_auth(&self) -> bool {
        match self {
            Error::Auth(_) => true,
            Error::Http(http) => http.is_unauthorized(),
            _ => false,
        }
    }
}

impl From<HttpError> for Error {
    fn from(err: HttpError) -> Self {
        Error::Http(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Http(HttpError::InvalidResponse(err.to_string()))
        } else if let Some(status) = err.status() {
            Error::Http(HttpError::Status {
                code: status.as_u16(),
                message: String::new(),
            })
        } else {
            Error::Http(HttpError::Unreachable(err.to_string()))
        }
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Http(HttpError::InvalidResponse(err.to_string()))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
