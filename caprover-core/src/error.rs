//! Error types for the CapRover client.
//!
//! Every failure a client call can produce is folded into a single
//! `CaproverError` enum. Nothing is retried internally; callers decide.

use thiserror::Error;

/// Convenience type alias for Results using CaproverError.
pub type CaproverResult<T> = Result<T, CaproverError>;

/// Unified error type for the CapRover client.
#[derive(Error, Debug)]
pub enum CaproverError {
    // -- Session errors --
    /// Login was rejected, or the login request could not be completed.
    #[error("authentication failed: {0}")]
    Auth(String),

    // -- Network errors --
    /// Connection, DNS, TLS or timeout failure before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON shape the endpoint promises.
    #[error("decode error: {0}")]
    Decode(String),

    /// The server answered with an envelope status other than success.
    ///
    /// Displays exactly as the server-supplied description.
    #[error("{description}")]
    Remote {
        /// Envelope status code.
        status: i32,
        /// Server-supplied message.
        description: String,
    },

    /// No app with the requested name exists.
    #[error("app not found: {0}")]
    NotFound(String),

    // -- Local errors --
    /// A caller-supplied argument is outside the range the server accepts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A request payload could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Failed to load or parse configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CaproverError {
    /// Whether this error came from the server rejecting the request
    /// (as opposed to the request never completing).
    pub fn is_remote(&self) -> bool {
        matches!(self, CaproverError::Remote { .. })
    }

    /// Whether this error is a name lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CaproverError::NotFound(_))
    }
}

impl From<serde_json::Error> for CaproverError {
    fn from(e: serde_json::Error) -> Self {
        CaproverError::Decode(e.to_string())
    }
}

impl From<toml::de::Error> for CaproverError {
    fn from(e: toml::de::Error) -> Self {
        CaproverError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_displays_description_verbatim() {
        let err = CaproverError::Remote {
            status: 1000,
            description: "App name already exists".to_string(),
        };
        assert_eq!(err.to_string(), "App name already exists");
        assert!(err.is_remote());
    }

    #[test]
    fn test_not_found_display() {
        let err = CaproverError::NotFound("web".to_string());
        assert_eq!(err.to_string(), "app not found: web");
        assert!(err.is_not_found());
        assert!(!err.is_remote());
    }

    #[test]
    fn test_serde_json_error_becomes_decode() {
        let err: CaproverError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, CaproverError::Decode(_)));
    }

    #[test]
    fn test_toml_error_becomes_config() {
        let err: CaproverError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, CaproverError::Config(_)));
    }
}
