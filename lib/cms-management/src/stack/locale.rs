use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body};
use crate::client::{ApiCall, ApiPath, ManagementError};

const RESOURCE: &str = "locale";

/// Handle on the locales of a stack: `/locales`, identified by their code.
#[derive(Debug, Clone)]
pub struct Locale {
    core: ResourceCore,
}

impl_resource!(Locale);

impl Locale {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("locales")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let code = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(code))
    }

    /// `GET /locales`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /locales/{code}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable code.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// `POST /locales`
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

    /// `PUT /locales/{code}`
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

    /// `DELETE /locales/{code}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable code.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Creates a locale with a fallback locale: `POST /locales`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn set_fallback<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "set_fallback", body)?;
        self.core.post(self.base(), Some(body))
    }

    /// Changes the fallback of a locale: `PUT /locales/{code}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn update_fallback<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("update_fallback")?;
        let body = json_body(RESOURCE, "update_fallback", body)?;
        self.core.put(path, Some(body))
    }
}
