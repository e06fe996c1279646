use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body, multipart_body};
use crate::client::{ApiCall, ApiPath, ManagementError, MultipartForm};

const RESOURCE: &str = "extension";

/// Handle on the extensions (custom fields, widgets, dashboards) of a stack: `/extensions`.
#[derive(Debug, Clone)]
pub struct Extension {
    core: ResourceCore,
}

impl_resource!(Extension);

impl Extension {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("extensions")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// `GET /extensions`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /extensions/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// `POST /extensions`
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

    /// `PUT /extensions/{uid}`
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

    /// `DELETE /extensions/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Uploads a hosted extension: `POST /extensions`.
    ///
    /// The form carries `extension[upload]`, `extension[title]`, `extension[tags]`,
    /// `extension[data_type]` and `extension[type]`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for an empty form.
    pub fn upload(&self, form: MultipartForm) -> Result<ApiCall, ManagementError> {
        let body = multipart_body(RESOURCE, "upload", form)?;
        self.core.post(self.base(), Some(body))
    }
}
