//! Error type shared by client construction and operations.

/// Error returned by client construction and, with the `client` feature,
/// by individual API operations.
///
/// The first three variants are configuration errors and are only raised
/// synchronously while building a client; a constructed [`KoiosClient`]
/// never produces them.
///
/// [`KoiosClient`]: crate::KoiosClient
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base-path override (or a statically configured network URL) does
    /// not parse as an absolute URL.
    #[error("invalid base path: {0:?} is not an absolute URL")]
    InvalidBasePath(String),

    /// An environment-sourced API key was requested but the named variable
    /// is unset or empty.
    #[error("missing API key: environment variable {0:?} is unset or empty")]
    MissingApiKey(String),

    /// Catch-all for other invalid inputs (malformed network names and the
    /// like).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Transport-level failure, propagated verbatim from the transport seam.
    #[cfg(feature = "client")]
    #[error(transparent)]
    Transport(#[from] crate::transport::TransportError),

    /// The service answered with a non-2xx status.
    #[cfg(feature = "client")]
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Response body, as text.
        message: String,
    },

    /// The response body did not decode into the expected type.
    #[cfg(feature = "client")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;
