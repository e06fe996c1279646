use bytes::Bytes;
use http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::ManagementError;

/// Maximum number of body bytes kept in an error message built from a raw body.
const BODY_MAX_LENGTH: usize = 1024;

/// The response of an executed management API call.
///
/// Non-success statuses are not turned into errors on receipt; use
/// [`json`](Self::json) or [`into_result`](Self::into_result) to get an
/// [`ManagementError::Api`] for them.
#[derive(Clone, derive_more::Debug)]
pub struct ApiResponse {
    path: String,
    status: StatusCode,
    headers: HeaderMap,
    #[debug(ignore)]
    body: Bytes,
}

/// The error document returned by the management API.
#[derive(Debug, Deserialize)]
struct ErrorDocument {
    error_message: Option<String>,
    error_code: Option<i64>,
    errors: Option<serde_json::Value>,
}

impl ApiResponse {
    pub(in crate::client) fn new(
        path: String,
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        Self {
            path,
            status,
            headers,
            body,
        }
    }

    /// Returns the HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Checks whether the status code is in the `2xx` range.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns the response itself for a success status, an API error otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::Api`] when the status is not `2xx`.
    pub fn into_result(self) -> Result<Self, ManagementError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(self.to_api_error())
        }
    }

    /// Deserializes a success response body.
    ///
    /// # Errors
    ///
    /// Returns [`ManagementError::Api`] when the status is not `2xx`, and
    /// [`ManagementError::JsonError`] when the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ManagementError> {
        if !self.is_success() {
            return Err(self.to_api_error());
        }

        serde_json::from_slice(&self.body).map_err(|error| ManagementError::JsonError {
            path: self.path.clone(),
            error,
            body: self.text(),
        })
    }

    fn to_api_error(&self) -> ManagementError {
        let status = self.status.as_u16();
        let result = match serde_json::from_slice::<ErrorDocument>(&self.body) {
            Ok(ErrorDocument {
                error_message: Some(message),
                error_code,
                errors,
            }) => ManagementError::Api {
                status,
                message,
                code: error_code,
                errors,
            },
            _ => {
                let mut message = self.text();
                if message.len() > BODY_MAX_LENGTH {
                    let cut = (0..=BODY_MAX_LENGTH)
                        .rev()
                        .find(|idx| message.is_char_boundary(*idx))
                        .unwrap_or_default();
                    message.truncate(cut);
                    message.push_str("... (truncated)");
                }
                ManagementError::Api {
                    status,
                    message,
                    code: None,
                    errors: None,
                }
            }
        };
        warn!(path = %self.path, %result, "management API error");
        result
    }
}
