use serde::Serialize;

use super::Resource;
use super::resource::{ResourceCore, impl_resource, json_body, multipart_body};
use crate::client::{ApiCall, ApiPath, ManagementError, MultipartForm};

const RESOURCE: &str = "global field";

/// Header selecting the global field API version; `3.2` enables nested global fields.
pub const API_VERSION_HEADER: &str = "api_version";

/// Handle on the global fields of a stack: `/global_fields`.
///
/// ```rust
/// use cms_management::{ManagementClient, Resource};
///
/// # fn example() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
/// let call = client
///     .stack("blt-api-key")
///     .global_field("seo")
///     .add_param("force", true)
///     .delete()?;
///
/// assert_eq!(call.request().path(), "/v3/global_fields/seo");
/// assert_eq!(call.request().query(), Some("force=true"));
/// assert!(call.request().body().is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GlobalField {
    core: ResourceCore,
}

impl_resource!(GlobalField);

impl GlobalField {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    /// Sets the `api_version` header on this handle.
    #[must_use]
    pub fn with_api_version(self, api_version: impl Into<String>) -> Self {
        self.add_header(API_VERSION_HEADER, api_version)
    }

    fn base(&self) -> ApiPath {
        self.core.path("global_fields")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// Lists global fields: `GET /global_fields`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// Fetches a global field: `GET /global_fields/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Creates a global field: `POST /global_fields`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn create<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "create", body)?;
        self.core.post(self.base(), Some(body))
    }

    /// Updates a global field: `PUT /global_fields/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn update<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("update")?;
        let body = json_body(RESOURCE, "update", body)?;
        self.core.put(path, Some(body))
    }

    /// Deletes a global field: `DELETE /global_fields/{uid}`.
    ///
    /// Add the `force` parameter to delete a field still referenced by content types.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Imports a global field schema file: `POST /global_fields/import`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for an empty form.
    pub fn import(&self, form: MultipartForm) -> Result<ApiCall, ManagementError> {
        let body = multipart_body(RESOURCE, "import", form)?;
        self.core.post(self.base().join("import"), Some(body))
    }

    /// Exports a global field schema: `GET /global_fields/{uid}/export`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn export(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("export")?.join("export"))
    }
}
