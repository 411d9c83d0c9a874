use std::error;
use std::fmt;

use reqwest::StatusCode;

/// All possible Mandrill client errors.
///
/// Nothing is retried or logged by the client; every failure is handed back
/// to the caller as one of these.
#[derive(Debug)]
pub enum Error {
    /// The client is missing something it needs before sending (API key,
    /// default sender) or the configuration could not be loaded.
    Configuration(String),

    /// A request was rejected before any network activity.
    Validation(String),

    /// The API answered with a non-2xx status.
    Http { status: StatusCode, body: String },

    RequestTimeout,
    Request(String),
    Json(String),
}

impl Error {
    /// HTTP status of the failed call, if the API answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match *self {
            Error::Http { status, .. } => Some(status),
            _ => None,
        }
    }

    pub(crate) fn missing_field(name: &str) -> Self {
        Error::Validation(format!("Missing required field: {}", name))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Configuration(ref msg) => write!(f, "ConfigurationError: {}", msg),
            Error::Validation(ref msg) => write!(f, "ValidationError: {}", msg),
            Error::Http {
                ref status,
                ref body,
            } => write!(f, "HttpError: {} {}", status, body),
            Error::RequestTimeout => f.write_str("RequestTimeout"),
            Error::Request(ref msg) => write!(f, "RequestError: {}", msg),
            Error::Json(ref msg) => write!(f, "JsonError: {}", msg),
        }
    }
}

impl error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::RequestTimeout
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<serde_json::error::Error> for Error {
    fn from(err: serde_json::error::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<::config::ConfigError> for Error {
    fn from(err: ::config::ConfigError) -> Self {
        Self::Configuration(err.to_string())
    }
}
