use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body};
use crate::client::{ApiCall, ApiPath, ManagementError};

/// Handle on the delivery tokens of a stack: `/stacks/delivery_tokens`.
///
/// `delete` accepts the optional `force` parameter.
#[derive(Debug, Clone)]
pub struct DeliveryToken {
    core: ResourceCore,
}

impl_resource!(DeliveryToken);

impl DeliveryToken {
    const RESOURCE: &'static str = "delivery token";

    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("stacks").join("delivery_tokens")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(Self::RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// `GET /stacks/delivery_tokens`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /stacks/delivery_tokens/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// `POST /stacks/delivery_tokens`
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn create<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(Self::RESOURCE, "create", body)?;
        self.core.post(self.base(), Some(body))
    }

    /// `PUT /stacks/delivery_tokens/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn update<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("update")?;
        let body = json_body(Self::RESOURCE, "update", body)?;
        self.core.put(path, Some(body))
    }

    /// `DELETE /stacks/delivery_tokens/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }
}

/// Handle on the management tokens of a stack: `/stacks/management_tokens`.
#[derive(Debug, Clone)]
pub struct ManagementToken {
    core: ResourceCore,
}

impl_resource!(ManagementToken);

impl ManagementToken {
    const RESOURCE: &'static str = "management token";

    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("stacks").join("management_tokens")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(Self::RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// `GET /stacks/management_tokens`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /stacks/management_tokens/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// `POST /stacks/management_tokens`
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn create<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(Self::RESOURCE, "create", body)?;
        self.core.post(self.base(), Some(body))
    }

    /// `PUT /stacks/management_tokens/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn update<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("update")?;
        let body = json_body(Self::RESOURCE, "update", body)?;
        self.core.put(path, Some(body))
    }

    /// `DELETE /stacks/management_tokens/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }
}
