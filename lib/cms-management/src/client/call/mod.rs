use http::Method;
use url::Url;

use super::{
    ApiPath, Credentials, HeaderStore, ManagementError, ParamStore, ParamValue, RequestBody,
};

mod execution;

/// A fully built, not yet executed request.
///
/// The descriptor is a snapshot: it owns copies of the query parameters and headers
/// as they were when the call was built, so later changes on the resource handle do
/// not apply to it.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    base_url: Url,
    path: ApiPath,
    params: ParamStore,
    query: Option<String>,
    headers: HeaderStore,
    credentials: Option<Credentials>,
    body: Option<RequestBody>,
}

impl RequestDescriptor {
    pub(crate) fn new(
        method: Method,
        base_url: Url,
        path: ApiPath,
        params: ParamStore,
        headers: HeaderStore,
        credentials: Option<Credentials>,
        body: Option<RequestBody>,
    ) -> Result<Self, ManagementError> {
        let query = params.to_query_string()?;
        Ok(Self {
            method,
            base_url,
            path,
            params,
            query,
            headers,
            credentials,
            body,
        })
    }

    /// Returns the HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the rendered path, e.g. `/v3/content_types/blog`.
    pub fn path(&self) -> String {
        self.path.to_string()
    }

    /// Returns the raw path segments, version prefix included.
    pub fn segments(&self) -> &[String] {
        self.path.segments()
    }

    /// Returns the query parameters captured by this request.
    pub fn params(&self) -> &ParamStore {
        &self.params
    }

    /// Returns the rendered query string, without the leading `?`.
    ///
    /// `None` when the request has no query parameters.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the headers sent with this request, client-level headers included.
    ///
    /// Credentials are kept apart, see [`credentials`](Self::credentials).
    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// Returns the credentials used for this request.
    ///
    /// They are skipped when the headers already hold an `authtoken` or an
    /// `authorization` header.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Returns the request body.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Returns the full request URL.
    pub fn url(&self) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(&self.path.to_string());
        url.set_query(self.query.as_deref());
        url
    }
}

/// A management API call, ready to be sent.
///
/// Resource handles return an `ApiCall` from every operation. The call can be
/// inspected through [`request`](Self::request), adjusted with call-local
/// parameters and headers, then executed with `.await` or [`send`](Self::send).
///
/// ```rust,no_run
/// use cms_management::{ManagementClient, Resource};
///
/// # async fn example() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
/// let stack = client.stack("blt-api-key");
///
/// let response = stack
///     .content_types()
///     .add_param("include_count", true)
///     .find()?
///     .await?;
///
/// let body: serde_json::Value = response.json()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub(super) client: reqwest::Client,
    pub(super) request: RequestDescriptor,
}

impl ApiCall {
    pub(crate) fn new(client: reqwest::Client, request: RequestDescriptor) -> Self {
        Self { client, request }
    }

    /// Returns the request this call will send.
    pub fn request(&self) -> &RequestDescriptor {
        &self.request
    }

    /// Consumes the call and returns its request descriptor.
    pub fn into_request(self) -> RequestDescriptor {
        self.request
    }

    /// Adds a query parameter to this call only.
    ///
    /// # Errors
    ///
    /// Fails if the resulting query string cannot be encoded.
    pub fn with_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Result<Self, ManagementError> {
        self.request.params.insert(key, value);
        self.request.query = self.request.params.to_query_string()?;
        Ok(self)
    }

    /// Adds a header to this call only.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.insert(name, value);
        self
    }
}
