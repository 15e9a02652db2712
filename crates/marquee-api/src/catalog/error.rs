//! `FetchError` - failure of a single catalog request.

/// Result alias for catalog requests.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Classification of a failed catalog request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// No connectivity, timeout, or the request could not be sent.
    Network(String),
    /// The server answered with a non-2xx status.
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Server-provided message (TMDB `status_message` or the raw body).
        message: String,
    },
    /// The response body did not match the expected payload shape.
    Decode(String),
}

/// Error returned by every catalog operation.
///
/// Carries the endpoint that was attempted so callers can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    endpoint: String,
    kind: FetchErrorKind,
}

impl FetchError {
    /// Creates a new error for the given endpoint.
    pub fn new(endpoint: impl Into<String>, kind: FetchErrorKind) -> Self {
        Self {
            endpoint: endpoint.into(),
            kind,
        }
    }

    /// Creates a `Network` error.
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(endpoint, FetchErrorKind::Network(message.into()))
    }

    /// Creates an `HttpStatus` error.
    pub fn http_status(
        endpoint: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::new(
            endpoint,
            FetchErrorKind::HttpStatus {
                status,
                message: message.into(),
            },
        )
    }

    /// Creates a `Decode` error.
    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(endpoint, FetchErrorKind::Decode(message.into()))
    }

    /// Endpoint path that was requested (e.g. `movie/popular`).
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Failure classification.
    #[must_use]
    pub const fn kind(&self) -> &FetchErrorKind {
        &self.kind
    }

    /// HTTP status code, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self.kind {
            FetchErrorKind::HttpStatus { status, .. } => Some(status),
            FetchErrorKind::Network(_) | FetchErrorKind::Decode(_) => None,
        }
    }
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            FetchErrorKind::Network(message) => {
                write!(f, "network error ({}): {message}", self.endpoint)
            }
            FetchErrorKind::HttpStatus { status, message } => {
                write!(f, "catalog API error (HTTP {status}, {}): {message}", self.endpoint)
            }
            FetchErrorKind::Decode(message) => {
                write!(f, "failed to decode response ({}): {message}", self.endpoint)
            }
        }
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_for_http_errors() {
        // Arrange
        let http = FetchError::http_status("movie/550", 404, "not found");
        let net = FetchError::network("movie/550", "connection refused");
        let decode = FetchError::decode("movie/550", "missing field `id`");

        // Act & Assert
        assert_eq!(http.status(), Some(404));
        assert_eq!(net.status(), None);
        assert_eq!(decode.status(), None);
    }

    #[test]
    fn test_display_includes_endpoint_and_status() {
        // Arrange
        let err = FetchError::http_status(
            "movie/popular",
            401,
            "Invalid API key: You must be granted a valid key.",
        );

        // Act
        let text = err.to_string();

        // Assert
        assert!(text.contains("HTTP 401"));
        assert!(text.contains("movie/popular"));
        assert!(text.contains("Invalid API key"));
    }

    #[test]
    fn test_endpoint_accessor() {
        // Arrange & Act
        let err = FetchError::network("search/movie", "timed out");

        // Assert
        assert_eq!(err.endpoint(), "search/movie");
        assert_eq!(
            err.kind(),
            &FetchErrorKind::Network(String::from("timed out"))
        );
    }
}
