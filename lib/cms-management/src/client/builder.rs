use std::fmt;
use std::time::Duration;

use http::uri::Scheme;
use url::Url;

use super::auth::Credentials;
use super::{HeaderStore, ManagementClient, ManagementError};

/// Header listing the early-access features enabled for a request.
pub const EARLY_ACCESS_HEADER: &str = "x-header-ea";

const USER_AGENT_HEADER: &str = "user-agent";
const DEFAULT_VERSION: &str = "v3";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosting region of the management API.
///
/// Each region maps to its own API host; see [`host`](Self::host).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Region {
    /// AWS North America, `api.contentstack.io`.
    #[default]
    NorthAmerica,
    /// AWS Europe.
    Europe,
    /// Azure North America.
    AzureNorthAmerica,
    /// Azure Europe.
    AzureEurope,
    /// Google Cloud North America.
    GcpNorthAmerica,
    /// Google Cloud Europe.
    GcpEurope,
}

impl Region {
    /// Returns the management API host of this region.
    pub fn host(self) -> &'static str {
        match self {
            Self::NorthAmerica => "api.contentstack.io",
            Self::Europe => "eu-api.contentstack.com",
            Self::AzureNorthAmerica => "azure-na-api.contentstack.com",
            Self::AzureEurope => "azure-eu-api.contentstack.com",
            Self::GcpNorthAmerica => "gcp-na-api.contentstack.com",
            Self::GcpEurope => "gcp-eu-api.contentstack.com",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NorthAmerica => "na",
            Self::Europe => "eu",
            Self::AzureNorthAmerica => "azure-na",
            Self::AzureEurope => "azure-eu",
            Self::GcpNorthAmerica => "gcp-na",
            Self::GcpEurope => "gcp-eu",
        };
        f.write_str(name)
    }
}

/// Builder for creating [`ManagementClient`] instances.
///
/// # Default Configuration
///
/// - **Scheme**: HTTPS
/// - **Host**: `api.contentstack.io` ([`Region::NorthAmerica`])
/// - **Port**: scheme default
/// - **Version**: `v3`
/// - **Timeout**: 30 seconds
/// - **Credentials**: none
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use cms_management::{ManagementClient, Region};
///
/// # fn example() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder()
///     .with_region(Region::Europe)
///     .with_timeout(Duration::from_secs(10))
///     .with_authtoken("blt-session-token")
///     .with_early_access(["taxonomy", "nested_global_fields"])
///     .build()?;
///
/// assert_eq!(client.base_url().as_str(), "https://eu-api.contentstack.com/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ManagementClientBuilder {
    client: Option<reqwest::Client>,
    scheme: Scheme,
    host: String,
    port: Option<u16>,
    version: String,
    timeout: Duration,
    user_agent: String,
    credentials: Option<Credentials>,
    early_access: Vec<String>,
}

impl ManagementClientBuilder {
    /// Builds the final `ManagementClient`.
    ///
    /// # Errors
    ///
    /// This method can fail if:
    /// - the scheme, host and port do not form a valid base URL
    /// - the API version is empty
    /// - the underlying `reqwest` client cannot be created
    pub fn build(self) -> Result<ManagementClient, ManagementError> {
        let Self {
            client,
            scheme,
            host,
            port,
            version,
            timeout,
            user_agent,
            credentials,
            early_access,
        } = self;

        let base_url = base_url(&scheme, &host, port)?;
        if version.trim().is_empty() {
            return Err(ManagementError::InvalidBaseUrl {
                error: "API version can not be empty".to_string(),
            });
        }

        let client = match client {
            Some(client) => client,
            None => reqwest::Client::builder().timeout(timeout).build()?,
        };

        let mut headers = HeaderStore::new().with(USER_AGENT_HEADER, user_agent);
        if !early_access.is_empty() {
            headers.insert(EARLY_ACCESS_HEADER, early_access.join(","));
        }

        Ok(ManagementClient {
            client,
            base_url,
            version,
            headers,
            credentials,
        })
    }

    /// Sets the HTTP scheme.
    ///
    /// Defaults to `Scheme::HTTPS`; `Scheme::HTTP` is mostly useful against a local mock server.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Sets the API host, overriding any region.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Targets the API host of a hosting region.
    #[must_use]
    pub fn with_region(mut self, region: Region) -> Self {
        self.host = region.host().to_string();
        self
    }

    /// Sets an explicit port.
    ///
    /// ```rust
    /// use cms_management::ManagementClient;
    /// use http::uri::Scheme;
    ///
    /// # fn example() -> Result<(), cms_management::ManagementError> {
    /// let client = ManagementClient::builder()
    ///     .with_scheme(Scheme::HTTP)
    ///     .with_host("127.0.0.1")
    ///     .with_port(8080)
    ///     .build()?;
    ///
    /// assert_eq!(client.base_url().as_str(), "http://127.0.0.1:8080/");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the API version, used as the first path segment (`v3` by default).
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sets the request timeout.
    ///
    /// Ignored when a custom client is provided with [`with_reqwest_client`](Self::with_reqwest_client).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Authenticates every request with a user session token (`authtoken` header).
    #[must_use]
    pub fn with_authtoken(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::AuthToken(token.into().into()));
        self
    }

    /// Authenticates every request with an OAuth access token (`authorization: Bearer`).
    #[must_use]
    pub fn with_oauth_token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::OAuth(token.into().into()));
        self
    }

    /// Sets the client-level credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Enables early-access features, sent as a comma separated `x-header-ea` header.
    #[must_use]
    pub fn with_early_access<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.early_access = features.into_iter().map(Into::into).collect();
        self
    }

    /// Uses a preconfigured `reqwest` client (proxy, TLS, connection pool...).
    #[must_use]
    pub fn with_reqwest_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }
}

impl Default for ManagementClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            scheme: Scheme::HTTPS,
            host: Region::default().host().to_string(),
            port: None,
            version: DEFAULT_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("cms-management-rust/{}", env!("CARGO_PKG_VERSION")),
            credentials: None,
            early_access: Vec::new(),
        }
    }
}

fn base_url(scheme: &Scheme, host: &str, port: Option<u16>) -> Result<Url, ManagementError> {
    let invalid = |error: String| ManagementError::InvalidBaseUrl { error };

    if host.trim().is_empty() {
        return Err(invalid("host can not be empty".to_string()));
    }

    let mut result = Url::parse(&format!("{scheme}://{host}"))
        .map_err(|err| invalid(format!("{host}: {err}")))?;
    if result.cannot_be_a_base() || result.host().is_none() {
        return Err(invalid(format!("{result} has no host")));
    }
    if result.path() != "/" || result.query().is_some() {
        return Err(invalid(format!("{host} must be a bare host name")));
    }
    if let Some(port) = port {
        result
            .set_port(Some(port))
            .map_err(|()| invalid(format!("can not set port {port} on {result}")))?;
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_default_builder_targets_north_america() {
        let client = ManagementClientBuilder::default()
            .build()
            .expect("should build client");

        insta::assert_snapshot!(client.base_url(), @"https://api.contentstack.io/");
        assert_eq!(client.version(), "v3");
    }

    #[rstest]
    #[case::europe(Region::Europe, "https://eu-api.contentstack.com/")]
    #[case::azure_na(Region::AzureNorthAmerica, "https://azure-na-api.contentstack.com/")]
    #[case::azure_eu(Region::AzureEurope, "https://azure-eu-api.contentstack.com/")]
    #[case::gcp_na(Region::GcpNorthAmerica, "https://gcp-na-api.contentstack.com/")]
    #[case::gcp_eu(Region::GcpEurope, "https://gcp-eu-api.contentstack.com/")]
    fn test_builder_with_region(#[case] region: Region, #[case] expected: &str) {
        let client = ManagementClientBuilder::default()
            .with_region(region)
            .build()
            .expect("should build client");

        assert_eq!(client.base_url().as_str(), expected);
    }

    #[test]
    fn test_builder_with_local_server() {
        let client = ManagementClientBuilder::default()
            .with_scheme(Scheme::HTTP)
            .with_host("localhost")
            .with_port(3000)
            .build()
            .expect("should build client");

        insta::assert_snapshot!(client.base_url(), @"http://localhost:3000/");
    }

    #[rstest]
    #[case::empty("")]
    #[case::blank("  ")]
    #[case::with_path("api.contentstack.io/v3")]
    #[case::invalid("api contentstack")]
    fn test_builder_rejects_invalid_host(#[case] host: &str) {
        let result = ManagementClientBuilder::default().with_host(host).build();

        assert!(matches!(
            result,
            Err(ManagementError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_builder_rejects_empty_version() {
        let result = ManagementClientBuilder::default().with_version("").build();

        assert!(matches!(
            result,
            Err(ManagementError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_client_headers() {
        let client = ManagementClientBuilder::default()
            .with_user_agent("my-app/1.0")
            .with_authtoken("blt-session")
            .with_early_access(["taxonomy", "nested_global_fields"])
            .build()
            .expect("should build client");

        let headers: Vec<_> = client.headers().iter().collect();
        assert_eq!(
            headers,
            vec![
                ("user-agent", "my-app/1.0"),
                ("x-header-ea", "taxonomy,nested_global_fields"),
            ]
        );
        assert_eq!(
            client.credentials(),
            Some(&Credentials::AuthToken("blt-session".into()))
        );
    }

    #[test]
    fn test_oauth_token_header() {
        let client = ManagementClientBuilder::default()
            .with_oauth_token("access")
            .build()
            .expect("should build client");

        let (name, value) = client
            .credentials()
            .map(Credentials::to_header)
            .transpose()
            .expect("valid header")
            .expect("credentials are set");
        assert_eq!(name, "authorization");
        assert_eq!(value, "Bearer access");
        assert!(!client.headers().contains("authorization"));
    }

    #[test]
    fn test_default_user_agent() {
        let client = ManagementClientBuilder::default()
            .build()
            .expect("should build client");

        let user_agent = client.headers().get("user-agent").unwrap_or_default();
        assert!(user_agent.starts_with("cms-management-rust/"));
    }
}
