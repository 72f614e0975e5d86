use std::error;
use std::fmt;
use std::sync::Arc;

pub mod client;
pub mod extract;
pub mod loader;
pub mod model;

#[derive(Debug, Clone)]
pub enum ApiError {
    /// Missing or unusable settings, e.g. an absent api key.
    Configuration(String),
    Request(Arc<reqwest::Error>),
    Json(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
}

impl ApiError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::Configuration(why) => write!(f, "Configuration error: {}", why),
            ApiError::Request(e) => write!(f, "HTTP request error: {}", e),
            ApiError::Json(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response ({}) {}", status_code, url),
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(Arc::new(e))
    }
}
