use std::fmt;

use async_trait::async_trait;

use super::types::Country;

/// Errors that can occur while fetching the country list.
/// There is no retry policy, so none of these carry retry hints.
#[derive(Debug)]
pub enum SourceError {
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The endpoint answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not a JSON array of country records.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Fetches the complete country list in one request.
    async fn fetch_all(&self) -> Result<Vec<Country>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_display() {
        assert_eq!(
            SourceError::Network("connection refused".to_string()).to_string(),
            "network error: connection refused"
        );
        assert_eq!(
            SourceError::Api {
                status: 503,
                message: "Service Unavailable".to_string()
            }
            .to_string(),
            "API error (HTTP 503): Service Unavailable"
        );
        assert_eq!(
            SourceError::Parse("expected array".to_string()).to_string(),
            "parse error: expected array"
        );
    }
}
