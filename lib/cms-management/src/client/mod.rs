use http::Method;
use url::Url;

use crate::stack::Stack;

mod builder;
pub use self::builder::{EARLY_ACCESS_HEADER, ManagementClientBuilder, Region};

mod call;
pub use self::call::{ApiCall, RequestDescriptor};

mod parameters;
pub use self::parameters::{
    ApiPath, FormPart, HeaderStore, MultipartForm, ParamStore, ParamValue, RequestBody,
};

mod response;
pub use self::response::ApiResponse;

mod auth;
pub use self::auth::{AUTHORIZATION_HEADER, AUTHTOKEN_HEADER, Credentials, SecureString};

mod error;
pub use self::error::ManagementError;

/// Header carrying the stack API key.
pub const API_KEY_HEADER: &str = "api_key";

/// Client for the management REST API.
///
/// The client holds the connection pool, the base URL, the client-level headers
/// (user agent, early-access features) and the credentials. It is cheap to clone.
/// Resources are reached through a [`Stack`], created with [`stack`](Self::stack).
///
/// # Example
///
/// ```rust,no_run
/// use cms_management::{ManagementClient, Resource};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder()
///     .with_authtoken("blt-session-token")
///     .build()?;
///
/// let stack = client.stack("blt-api-key");
/// let response = stack.branches().find()?.await?;
/// println!("{}", response.text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ManagementClient {
    client: reqwest::Client,
    base_url: Url,
    version: String,
    headers: HeaderStore,
    credentials: Option<Credentials>,
}

impl ManagementClient {
    /// Creates a new builder with the default configuration.
    pub fn builder() -> ManagementClientBuilder {
        ManagementClientBuilder::default()
    }

    /// Returns the base URL, without the version segment.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the API version used as the first path segment.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the headers sent with every request.
    ///
    /// Credentials are not part of them, see [`credentials`](Self::credentials).
    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Returns the client-level credentials.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns a stack handle authenticated by the client-level credentials.
    pub fn stack(&self, api_key: impl Into<String>) -> Stack {
        let headers = HeaderStore::new().with(API_KEY_HEADER, api_key);
        Stack::new(self.clone(), headers, None)
    }

    /// Returns a stack handle authenticated by a stack management token.
    ///
    /// The management token replaces the client-level credentials for this stack
    /// and every handle created from it.
    pub fn stack_with_management_token(
        &self,
        api_key: impl Into<String>,
        management_token: impl Into<String>,
    ) -> Stack {
        let credentials = Credentials::ManagementToken(SecureString::new(management_token));
        let headers = HeaderStore::new().with(API_KEY_HEADER, api_key);
        Stack::new(self.clone(), headers, Some(credentials))
    }

    /// Returns a stack handle without API key, used to create a new stack.
    pub fn stack_without_key(&self) -> Stack {
        Stack::new(self.clone(), HeaderStore::new(), None)
    }

    /// Starts an endpoint path with the version segment.
    pub(crate) fn path(&self, first: &str) -> ApiPath {
        ApiPath::new(self.version.as_str()).join(first)
    }

    /// Builds a call from a resource's state.
    ///
    /// The resource headers are merged over the client-level headers, and the
    /// resource credentials, when set, replace the client-level ones.
    pub(crate) fn call(
        &self,
        method: Method,
        path: ApiPath,
        params: &ParamStore,
        headers: &HeaderStore,
        credentials: Option<&Credentials>,
        body: Option<RequestBody>,
    ) -> Result<ApiCall, ManagementError> {
        let mut all_headers = self.headers.clone();
        all_headers.merge(headers);
        let credentials = credentials.or(self.credentials.as_ref()).cloned();

        let request = RequestDescriptor::new(
            method,
            self.base_url.clone(),
            path,
            params.clone(),
            all_headers,
            credentials,
            body,
        )?;
        Ok(ApiCall::new(self.client.clone(), request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Resource;

    fn client() -> ManagementClient {
        ManagementClient::builder()
            .with_authtoken("blt-session")
            .build()
            .expect("should build client")
    }

    #[test]
    fn test_call_merges_client_headers() {
        let client = client();
        let headers = HeaderStore::new()
            .with("api_key", "blt123")
            .with("authtoken", "blt-override");

        let call = client
            .call(
                Method::GET,
                client.path("labels"),
                &ParamStore::new(),
                &headers,
                None,
                None,
            )
            .expect("should build call");

        let request = call.request();
        assert_eq!(request.headers().get("authtoken"), Some("blt-override"));
        assert_eq!(
            request.credentials(),
            Some(&Credentials::AuthToken("blt-session".into()))
        );
        assert_eq!(request.headers().get("api_key"), Some("blt123"));
        assert!(request.headers().contains("user-agent"));
        insta::assert_snapshot!(request.url(), @"https://api.contentstack.io/v3/labels");
    }

    #[test]
    fn test_credentials_are_not_plain_headers() {
        let client = client();

        assert!(!client.headers().contains("authtoken"));
        assert_eq!(
            client.credentials(),
            Some(&Credentials::AuthToken("blt-session".into()))
        );
    }

    #[test]
    fn test_management_token_replaces_session_token() {
        let stack = client().stack_with_management_token("blt123", "cs-management");

        let call = stack.labels().find().expect("should build call");
        let request = call.build_request().expect("should build request");

        assert_eq!(stack.headers().get("api_key"), Some("blt123"));
        assert!(!stack.headers().contains("authorization"));
        assert_eq!(
            call.request().credentials(),
            Some(&Credentials::ManagementToken("cs-management".into()))
        );
        assert!(request.headers().get("authtoken").is_none());
        assert_eq!(
            request.headers().get("authorization").map(|it| it.as_bytes()),
            Some(&b"cs-management"[..])
        );
    }

    #[test]
    fn test_stack_without_key() {
        let stack = client().stack_without_key();

        assert!(stack.headers().is_empty());
    }
}
