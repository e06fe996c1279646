use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body, require_value};
use crate::client::{ApiCall, ApiPath, ManagementError};

/// Handle on the releases of a stack: `/releases`.
#[derive(Debug, Clone)]
pub struct Release {
    core: ResourceCore,
}

impl_resource!(Release);

impl Release {
    const RESOURCE: &'static str = "release";

    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("releases")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(Self::RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// Returns a handle on the items of this release.
    pub fn items(&self) -> ReleaseItem {
        ReleaseItem::new(self.core.child(None), self.core.uid().map(str::to_string))
    }

    /// Lists releases: `GET /releases`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// Fetches a release: `GET /releases/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Creates a release: `POST /releases`.
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

    /// Updates a release: `PUT /releases/{uid}`.
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

    /// Deletes a release: `DELETE /releases/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Deploys a release to environments: `POST /releases/{uid}/deploy`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn deploy<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("deploy")?.join("deploy");
        let body = json_body(Self::RESOURCE, "deploy", body)?;
        self.core.post(path, Some(body))
    }

    /// Clones a release: `POST /releases/{uid}/clone`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn clone_release<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("clone_release")?.join("clone");
        let body = json_body(Self::RESOURCE, "clone_release", body)?;
        self.core.post(path, Some(body))
    }
}

/// Handle on the items of a release: `/releases/{release}/items`.
#[derive(Debug, Clone)]
pub struct ReleaseItem {
    core: ResourceCore,
    release: Option<String>,
}

impl_resource!(ReleaseItem);

impl ReleaseItem {
    const RESOURCE: &'static str = "release item";

    pub(crate) fn new(core: ResourceCore, release: Option<String>) -> Self {
        Self { core, release }
    }

    /// Returns the UID of the parent release.
    pub fn release_uid(&self) -> Option<&str> {
        self.release.as_deref()
    }

    fn base(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let Some(release) = self.release.as_deref() else {
            return Err(ManagementError::MissingUid {
                resource: Release::RESOURCE,
                operation,
            });
        };
        let release = require_value(Release::RESOURCE, release)?;
        Ok(self.core.path("releases").join(release))
    }

    /// Lists the items of the release: `GET /releases/{release}/item`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the release UID is not usable.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base("find")?.join("item"))
    }

    /// Adds items to the release: `POST /releases/{release}/items`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn add_items<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.base("add_items")?.join("items");
        let body = json_body(Self::RESOURCE, "add_items", body)?;
        self.core.post(path, Some(body))
    }

    /// Updates the items of the release to their latest version:
    /// `PUT /releases/{release}/update_items`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn update_items<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.base("update_items")?.join("update_items");
        let body = json_body(Self::RESOURCE, "update_items", body)?;
        self.core.put(path, Some(body))
    }

    /// Removes items from the release: `DELETE /releases/{release}/items`.
    ///
    /// The items to remove are sent in the request body.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn delete_items<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.base("delete_items")?.join("items");
        let body = json_body(Self::RESOURCE, "delete_items", body)?;
        self.core.delete(path, Some(body))
    }

    /// Moves items to another release: `POST /releases/{release}/items/move`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn move_items<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.base("move_items")?.join("items").join("move");
        let body = json_body(Self::RESOURCE, "move_items", body)?;
        self.core.post(path, Some(body))
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;

    use crate::stack::Resource;
    use crate::stack::tests::stack;

    #[test]
    fn test_release_deploy() {
        let body = json!({"release": {"environments": ["production"], "locales": ["en-us"]}});

        let call = stack()
            .release("blt-release")
            .deploy(&body)
            .expect("should build call");

        assert_eq!(call.request().method(), Method::POST);
        assert_eq!(call.request().path(), "/v3/releases/blt-release/deploy");
    }

    #[test]
    fn test_release_clone() {
        let call = stack()
            .release("blt-release")
            .clone_release(&json!({"release": {"name": "Copy"}}))
            .expect("should build call");

        assert_eq!(call.request().path(), "/v3/releases/blt-release/clone");
    }

    #[test]
    fn test_items_paths() {
        let items = stack().release("blt-release").items();
        let body = json!({"items": [{"uid": "blt-entry", "version": 1}]});

        let find = items.find().expect("should build call");
        let add = items.add_items(&body).expect("should build call");
        let update = items.update_items(&body).expect("should build call");
        let moved = items.move_items(&body).expect("should build call");

        assert_eq!(find.request().path(), "/v3/releases/blt-release/item");
        assert_eq!(add.request().path(), "/v3/releases/blt-release/items");
        assert_eq!(update.request().method(), Method::PUT);
        assert_eq!(
            update.request().path(),
            "/v3/releases/blt-release/update_items"
        );
        assert_eq!(moved.request().path(), "/v3/releases/blt-release/items/move");
    }

    #[test]
    fn test_delete_items_sends_body() {
        let body = json!({"items": [{"uid": "blt-entry", "locale": "en-us"}]});

        let call = stack()
            .release("blt-release")
            .items()
            .add_param("all", true)
            .delete_items(&body)
            .expect("should build call");

        let request = call.request();
        assert_eq!(request.method(), Method::DELETE);
        assert_eq!(request.query(), Some("all=true"));
        assert_eq!(request.body().and_then(|it| it.as_json()), Some(&body));
    }

    #[test]
    fn test_items_require_release() {
        let error = stack()
            .releases()
            .items()
            .find()
            .expect_err("release is required");

        insta::assert_snapshot!(error, @"release UID must be set before calling find");
    }
}
