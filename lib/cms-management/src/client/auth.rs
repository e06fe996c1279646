use std::fmt;

use http::header::{HeaderName, HeaderValue};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ManagementError;

/// Header carrying a user session token.
pub const AUTHTOKEN_HEADER: &str = "authtoken";

/// Header carrying a stack management token or an OAuth bearer token.
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Number of characters kept visible at each end of a masked token.
const VISIBLE_CHARS: usize = 4;

/// A token value, wiped from memory when dropped.
///
/// `Display` only shows the first and last characters of long tokens, and
/// `Debug` never shows the value.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Wraps a token value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the clear token, for building the request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString(***)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.0.chars().count();
        if count <= 2 * VISIBLE_CHARS {
            return f.write_str("***");
        }
        let head: String = self.0.chars().take(VISIBLE_CHARS).collect();
        let tail: String = self.0.chars().skip(count - VISIBLE_CHARS).collect();
        write!(f, "{head}...{tail}")
    }
}

impl From<String> for SecureString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SecureString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Credentials sent with management API requests.
///
/// Credentials are kept apart from the plain headers and written to the outgoing
/// request only, unless the request already carries an `authtoken` or
/// `authorization` header.
///
/// # Examples
///
/// ```rust
/// use cms_management::Credentials;
///
/// // Session token obtained from a login
/// let credentials = Credentials::AuthToken("blt-session".into());
/// assert_eq!(credentials.header_name(), "authtoken");
///
/// // Stack management token
/// let credentials = Credentials::ManagementToken("cs-management".into());
/// assert_eq!(credentials.header_name(), "authorization");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// User session token, sent as `authtoken: <token>`.
    AuthToken(SecureString),

    /// Stack management token, sent as `authorization: <token>`.
    ManagementToken(SecureString),

    /// OAuth access token, sent as `authorization: Bearer <token>`.
    OAuth(SecureString),
}

impl Credentials {
    /// Returns the header name used by these credentials.
    pub fn header_name(&self) -> &'static str {
        match self {
            Self::AuthToken(_) => AUTHTOKEN_HEADER,
            Self::ManagementToken(_) | Self::OAuth(_) => AUTHORIZATION_HEADER,
        }
    }

    /// Returns the header value used by these credentials.
    pub fn header_value(&self) -> String {
        match self {
            Self::AuthToken(token) | Self::ManagementToken(token) => token.expose().to_string(),
            Self::OAuth(token) => format!("Bearer {}", token.expose()),
        }
    }

    /// Builds the outgoing header, flagged as sensitive.
    ///
    /// The clear value only exists while the header is built.
    pub(crate) fn to_header(&self) -> Result<(HeaderName, HeaderValue), ManagementError> {
        let mut value = self.header_value();
        let result = HeaderValue::from_str(&value);
        value.zeroize();

        let mut value = result?;
        value.set_sensitive(true);
        Ok((HeaderName::from_static(self.header_name()), value))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::AuthToken(_) => "AuthToken",
            Self::ManagementToken(_) => "ManagementToken",
            Self::OAuth(_) => "OAuth",
        };
        write!(f, "{kind}([REDACTED])")
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AuthToken(token) => write!(f, "AuthToken {token}"),
            Self::ManagementToken(token) => write!(f, "ManagementToken {token}"),
            Self::OAuth(token) => write!(f, "Bearer {token}"),
        }
    }
}
