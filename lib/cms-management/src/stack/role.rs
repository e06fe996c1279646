use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body};
use crate::client::{ApiCall, ApiPath, ManagementError};

const RESOURCE: &str = "role";

/// Handle on the roles of a stack: `/roles`.
///
/// `fetch`, `update` and `delete` need a role UID.
#[derive(Debug, Clone)]
pub struct Role {
    core: ResourceCore,
}

impl_resource!(Role);

impl Role {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("roles")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// `GET /roles`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /roles/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// `POST /roles`
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

    /// `PUT /roles/{uid}`
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

    /// `DELETE /roles/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }
}

#[cfg(test)]
mod tests {
    use assert2::check;
    use rstest::rstest;
    use serde_json::json;

    use super::Role;
    use crate::ManagementError;
    use crate::stack::tests::stack;

    #[rstest]
    #[case::fetch("fetch")]
    #[case::update("update")]
    #[case::delete("delete")]
    fn test_uid_required(#[case] operation: &'static str) {
        let call = |role: Role| match operation {
            "fetch" => role.fetch(),
            "update" => role.update(&json!({"role": {"name": "Editor"}})),
            _ => role.delete(),
        };

        let missing = call(stack().roles()).expect_err("uid is absent");
        let empty = call(stack().role("")).expect_err("uid is empty");
        let present = call(stack().role("blt-role"));

        check!(
            matches!(missing, ManagementError::MissingUid { resource: "role", operation: op } if op == operation)
        );
        check!(matches!(empty, ManagementError::EmptyUid { resource: "role" }));
        check!(present.is_ok());
    }

    #[test]
    fn test_fetch_path() {
        let call = stack().role("blt-role").fetch().expect("should build call");

        check!(call.request().path() == "/v3/roles/blt-role");
        check!(call.request().query().is_none());
    }
}
