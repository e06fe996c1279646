use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body};
use crate::client::{ApiCall, ApiPath, ManagementError};

const RESOURCE: &str = "environment";

/// Handle on the publishing environments of a stack: `/environments`.
///
/// Environments are identified by their name.
#[derive(Debug, Clone)]
pub struct Environment {
    core: ResourceCore,
}

impl_resource!(Environment);

impl Environment {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("environments")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let name = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(name))
    }

    /// `GET /environments`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /environments/{name}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable name.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// `POST /environments`
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

    /// `PUT /environments/{name}`
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

    /// `DELETE /environments/{name}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable name.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }
}
