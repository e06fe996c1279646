/// Errors that can occur when building or executing a management API call.
///
/// Precondition failures (`MissingUid`, `EmptyUid`, `MissingBody`) are raised while
/// the request is being built, so no network call is attempted. Transport errors are
/// surfaced unchanged from `reqwest`.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ManagementError {
    /// Transport failure reported by `reqwest` (connection, timeout, TLS...).
    ReqwestError(reqwest::Error),

    /// The request URL could not be parsed.
    UrlError(url::ParseError),

    /// The request could not be assembled.
    HttpError(http::Error),

    /// A header name is not a valid HTTP token.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// A header value, credentials included, holds characters HTTP does not allow.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// JSON serialization error for request bodies.
    JsonValueError(serde_json::Error),

    /// The query string could not be URL-encoded.
    QuerySerializationError(serde_urlencoded::ser::Error),

    /// The operation needs a UID but the resource handle was created without one.
    #[display("{resource} UID must be set before calling {operation}")]
    #[from(skip)]
    MissingUid {
        /// The resource kind, e.g. `branch`.
        resource: &'static str,
        /// The operation that was called, e.g. `fetch`.
        operation: &'static str,
    },

    /// The resource handle carries a UID that is empty or blank.
    #[display("{resource} UID can not be empty")]
    #[from(skip)]
    EmptyUid {
        /// The resource kind, e.g. `role`.
        resource: &'static str,
    },

    /// The operation requires a request body and none was provided.
    #[display("{resource} {operation} requires a request body")]
    #[from(skip)]
    MissingBody {
        /// The resource kind.
        resource: &'static str,
        /// The operation that was called.
        operation: &'static str,
    },

    /// The configured scheme, host, port and version do not form a usable base URL.
    #[display("Invalid base URL: {error}")]
    #[from(skip)]
    InvalidBaseUrl {
        /// Description of why the base URL is invalid.
        error: String,
    },

    /// The API answered with a non-success status code.
    #[display("API error ({status}): {message}")]
    #[from(skip)]
    Api {
        /// The HTTP status code.
        status: u16,
        /// The `error_message` of the error document, or the raw body.
        message: String,
        /// The `error_code` of the error document, if any.
        code: Option<i64>,
        /// Field-level details from the `errors` member, if any.
        errors: Option<serde_json::Value>,
    },

    /// A success response body does not match the requested type.
    #[display("invalid JSON response from {path}: {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// Path of the request.
        path: String,
        /// Error reported by `serde_json`.
        error: serde_json::Error,
        /// The response body, as text.
        body: String,
    },
}

impl ManagementError {
    /// Returns `true` for errors raised before any network call was attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingUid { .. } | Self::EmptyUid { .. } | Self::MissingBody { .. }
        )
    }

    /// Returns the HTTP status of an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::ReqwestError(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
