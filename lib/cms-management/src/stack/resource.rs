use http::Method;
use serde::Serialize;

use crate::client::{
    ApiCall, ApiPath, Credentials, HeaderStore, ManagementClient, ManagementError, MultipartForm,
    ParamStore, ParamValue, RequestBody,
};

/// State shared by every resource handle.
///
/// The header store is a private copy of the parent's headers taken when the
/// handle is created. `credentials` overrides the client-level credentials.
#[derive(Debug, Clone)]
pub struct ResourceCore {
    client: ManagementClient,
    headers: HeaderStore,
    credentials: Option<Credentials>,
    params: ParamStore,
    uid: Option<String>,
}

impl ResourceCore {
    pub(crate) fn new(client: ManagementClient, headers: HeaderStore, uid: Option<String>) -> Self {
        Self {
            client,
            headers,
            credentials: None,
            params: ParamStore::new(),
            uid,
        }
    }

    #[must_use]
    pub(crate) fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Creates the state of a child handle, copying this handle's headers and credentials.
    pub(crate) fn child(&self, uid: Option<String>) -> Self {
        Self::new(self.client.clone(), self.headers.clone(), uid)
            .with_credentials(self.credentials.clone())
    }

    pub(crate) fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    /// Starts an endpoint path after the version segment.
    pub(crate) fn path(&self, first: &str) -> ApiPath {
        self.client.path(first)
    }

    /// Returns the UID of this handle.
    ///
    /// # Errors
    ///
    /// `MissingUid` when the handle has no UID, `EmptyUid` when it is blank.
    pub(crate) fn require_uid(
        &self,
        resource: &'static str,
        operation: &'static str,
    ) -> Result<&str, ManagementError> {
        match self.uid.as_deref() {
            None => Err(ManagementError::MissingUid {
                resource,
                operation,
            }),
            Some(uid) => require_value(resource, uid),
        }
    }

    pub(crate) fn get(&self, path: ApiPath) -> Result<ApiCall, ManagementError> {
        self.send(Method::GET, path, &ParamStore::new(), None)
    }

    pub(crate) fn get_with(
        &self,
        path: ApiPath,
        params: &ParamStore,
    ) -> Result<ApiCall, ManagementError> {
        self.send(Method::GET, path, params, None)
    }

    pub(crate) fn post(
        &self,
        path: ApiPath,
        body: Option<RequestBody>,
    ) -> Result<ApiCall, ManagementError> {
        self.send(Method::POST, path, &ParamStore::new(), body)
    }

    pub(crate) fn put(
        &self,
        path: ApiPath,
        body: Option<RequestBody>,
    ) -> Result<ApiCall, ManagementError> {
        self.send(Method::PUT, path, &ParamStore::new(), body)
    }

    pub(crate) fn delete(
        &self,
        path: ApiPath,
        body: Option<RequestBody>,
    ) -> Result<ApiCall, ManagementError> {
        self.send(Method::DELETE, path, &ParamStore::new(), body)
    }

    /// Builds a call, with `extra` parameters merged over the handle's own.
    pub(crate) fn send(
        &self,
        method: Method,
        path: ApiPath,
        extra: &ParamStore,
        body: Option<RequestBody>,
    ) -> Result<ApiCall, ManagementError> {
        let mut params = self.params.clone();
        params.merge(extra);
        self.client.call(
            method,
            path,
            &params,
            &self.headers,
            self.credentials.as_ref(),
            body,
        )
    }
}

/// Serializes a required JSON body.
///
/// # Errors
///
/// `MissingBody` when `body` serializes to `null`.
pub(crate) fn json_body<T>(
    resource: &'static str,
    operation: &'static str,
    body: &T,
) -> Result<RequestBody, ManagementError>
where
    T: Serialize + ?Sized,
{
    let result = RequestBody::json(body)?;
    if result.as_json().is_some_and(serde_json::Value::is_null) {
        return Err(ManagementError::MissingBody {
            resource,
            operation,
        });
    }
    Ok(result)
}

/// Wraps a required multipart body.
///
/// # Errors
///
/// `MissingBody` when the form has no part.
pub(crate) fn multipart_body(
    resource: &'static str,
    operation: &'static str,
    form: MultipartForm,
) -> Result<RequestBody, ManagementError> {
    if form.is_empty() {
        return Err(ManagementError::MissingBody {
            resource,
            operation,
        });
    }
    Ok(RequestBody::Multipart(form))
}

/// Checks a UID given as an operation argument.
///
/// # Errors
///
/// `EmptyUid` when the value is blank.
pub(crate) fn require_value<'a>(
    resource: &'static str,
    value: &'a str,
) -> Result<&'a str, ManagementError> {
    if value.trim().is_empty() {
        return Err(ManagementError::EmptyUid { resource });
    }
    Ok(value)
}

/// Common behaviour of resource handles.
///
/// Every handle owns its query parameters and headers. The fluent methods consume
/// and return the handle, and apply to every call built afterwards.
///
/// ```rust
/// use cms_management::{ManagementClient, Resource};
///
/// # fn example() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
/// let labels = client
///     .stack("blt-api-key")
///     .labels()
///     .add_param("include_count", true)
///     .add_header("branch", "development");
///
/// let call = labels.find()?;
/// assert_eq!(call.request().query(), Some("include_count=true"));
/// assert_eq!(call.request().headers().get("branch"), Some("development"));
/// # Ok(())
/// # }
/// ```
pub trait Resource: Sized {
    #[doc(hidden)]
    fn core(&self) -> &ResourceCore;

    #[doc(hidden)]
    fn core_mut(&mut self) -> &mut ResourceCore;

    /// Adds or replaces a query parameter.
    #[must_use]
    fn add_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.core_mut().params.insert(key, value);
        self
    }

    /// Adds or replaces several query parameters, in iteration order.
    #[must_use]
    fn add_params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ParamValue>,
    {
        self.core_mut().params.extend(params);
        self
    }

    /// Removes a query parameter; removing an absent key does nothing.
    #[must_use]
    fn remove_param(mut self, key: &str) -> Self {
        self.core_mut().params.remove(key);
        self
    }

    /// Removes every query parameter.
    #[must_use]
    fn clear_params(mut self) -> Self {
        self.core_mut().params.clear();
        self
    }

    /// Adds or replaces a header on this handle only.
    #[must_use]
    fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.core_mut().headers.insert(name, value);
        self
    }

    /// Removes a header from this handle only.
    #[must_use]
    fn remove_header(mut self, name: &str) -> Self {
        self.core_mut().headers.remove(name);
        self
    }

    /// Returns the query parameters of this handle.
    fn params(&self) -> &ParamStore {
        &self.core().params
    }

    /// Returns the headers of this handle, without the client-level headers.
    fn headers(&self) -> &HeaderStore {
        &self.core().headers
    }

    /// Returns the UID this handle was created with.
    fn uid(&self) -> Option<&str> {
        self.core().uid()
    }
}

/// Implements [`Resource`] for a handle holding its state in a `core` field.
macro_rules! impl_resource {
    ($($name:ty),+ $(,)?) => {
        $(
            impl $crate::stack::Resource for $name {
                fn core(&self) -> &$crate::stack::resource::ResourceCore {
                    &self.core
                }

                fn core_mut(&mut self) -> &mut $crate::stack::resource::ResourceCore {
                    &mut self.core
                }
            }
        )+
    };
}
pub(crate) use impl_resource;
