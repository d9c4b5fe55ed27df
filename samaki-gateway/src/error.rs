use thiserror::Error;

/// Error types for gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Required fields missing or malformed; caught before dispatch
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Response received with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Network or connection error (no response received)
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// A 2xx response body that could not be decoded
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

impl GatewayError {
    /// Create an invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an API error
    pub fn api_error(status: u16, message: String) -> Self {
        Self::Api { status, message }
    }

    /// Status code of the failed response, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api { status, .. } => Some(*status),
            GatewayError::Network { source } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
