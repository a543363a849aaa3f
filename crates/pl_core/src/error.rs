use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {}", describe_transport(.status, .reason))]
    Transport {
        status: Option<u16>,
        reason: String,
    },

    #[error("API error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn describe_transport(status: &Option<u16>, reason: &str) -> String {
    match status {
        Some(code) => format!("{} {}", code, reason),
        None => reason.to_string(),
    }
}

impl Error {
    /// Build a transport error for a non-2xx status.
    pub fn http_status(status: u16, reason: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            reason: reason.into(),
        }
    }

    /// Build a transport error for a failure with no HTTP status (connect, timeout, TLS).
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let err = Error::http_status(502, "Bad Gateway");
        assert_eq!(err.to_string(), "Transport error: 502 Bad Gateway");

        let err = Error::connection("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_api_display() {
        let err = Error::Api("Invalid API key".to_string());
        assert_eq!(err.to_string(), "API error: Invalid API key");
    }
}
