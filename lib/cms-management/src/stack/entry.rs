use http::Method;
use serde::Serialize;
use serde_json::json;

use super::Resource;
use super::resource::{ResourceCore, impl_resource, json_body, multipart_body, require_value};
use crate::client::{ApiCall, ApiPath, ManagementError, MultipartForm, ParamStore};

const RESOURCE: &str = "entry";
const CONTENT_TYPE: &str = "content type";

/// Handle on the entries of a content type: `/content_types/{content_type}/entries`.
///
/// ```rust
/// use cms_management::{ManagementClient, Resource};
/// use serde_json::json;
///
/// # fn example() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
/// let entries = client
///     .stack("blt-api-key")
///     .content_type("blog_post")
///     .entries()
///     .query(json!({"title": "Hello"}))
///     .add_param("locale", "en-us");
///
/// let call = entries.find()?;
/// assert_eq!(call.request().path(), "/v3/content_types/blog_post/entries");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Entry {
    core: ResourceCore,
    content_type: Option<String>,
}

impl_resource!(Entry);

impl Entry {
    pub(crate) fn new(core: ResourceCore, content_type: Option<String>) -> Self {
        Self { core, content_type }
    }

    /// Returns the UID of the parent content type.
    pub fn content_type_uid(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Sets the `query` parameter, a JSON document filtering the entries.
    #[must_use]
    pub fn query(self, query: serde_json::Value) -> Self {
        self.add_param("query", query)
    }

    fn base(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let content_type = match self.content_type.as_deref() {
            Some(content_type) => require_value(CONTENT_TYPE, content_type)?,
            None => {
                return Err(ManagementError::MissingUid {
                    resource: CONTENT_TYPE,
                    operation,
                });
            }
        };
        Ok(self
            .core
            .path("content_types")
            .join(content_type)
            .join("entries"))
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let base = self.base(operation)?;
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(base.join(uid))
    }

    /// Lists entries: `GET /content_types/{content_type}/entries`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the content type UID is not usable.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base("find")?)
    }

    /// Fetches an entry: `GET .../entries/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Creates an entry: `POST .../entries`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn create<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.base("create")?;
        let body = json_body(RESOURCE, "create", body)?;
        self.core.post(path, Some(body))
    }

    /// Updates an entry: `PUT .../entries/{uid}`.
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

    /// Applies atomic operations (`PUSH`, `PULL`, `UPDATE`, `ADD`, `SUB`):
    /// `PUT .../entries/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn atomic_operation<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("atomic_operation")?;
        let body = json_body(RESOURCE, "atomic_operation", body)?;
        self.core.put(path, Some(body))
    }

    /// Deletes an entry: `DELETE .../entries/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Lists the versions of an entry: `GET .../entries/{uid}/versions`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn versions(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("versions")?.join("versions"))
    }

    /// Names a version: `POST .../entries/{uid}/versions/{version}/name`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn set_version_name(
        &self,
        version: u32,
        name: impl Into<String>,
    ) -> Result<ApiCall, ManagementError> {
        let path = self
            .item("set_version_name")?
            .join("versions")
            .join(version.to_string())
            .join("name");
        let body = json!({ "entry": { "_version_name": name.into() } });
        let body = json_body(RESOURCE, "set_version_name", &body)?;
        self.core.post(path, Some(body))
    }

    /// Removes the name of a version: `DELETE .../entries/{uid}/versions/{version}/name`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn delete_version_name(&self, version: u32) -> Result<ApiCall, ManagementError> {
        let path = self
            .item("delete_version_name")?
            .join("versions")
            .join(version.to_string())
            .join("name");
        self.core.delete(path, None)
    }

    /// Lists the references of an entry: `GET .../entries/{uid}/references`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn references(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("references")?.join("references"))
    }

    /// Lists the locales of an entry: `GET .../entries/{uid}/locales`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn languages(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("languages")?.join("locales"))
    }

    /// Localizes an entry: `PUT .../entries/{uid}?locale={locale}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn localize<T>(&self, locale: &str, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("localize")?;
        let params = ParamStore::new().with("locale", require_value("locale", locale)?);
        let body = json_body(RESOURCE, "localize", body)?;
        self.core.send(Method::PUT, path, &params, Some(body))
    }

    /// Removes a localized version: `POST .../entries/{uid}/unlocalize?locale={locale}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID or the locale is not usable.
    pub fn unlocalize(&self, locale: &str) -> Result<ApiCall, ManagementError> {
        let path = self.item("unlocalize")?.join("unlocalize");
        let params = ParamStore::new().with("locale", require_value("locale", locale)?);
        self.core.send(Method::POST, path, &params, None)
    }

    /// Exports an entry: `GET .../entries/{uid}/export`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn export(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("export")?.join("export"))
    }

    /// Imports a new entry from a file: `POST .../entries/import`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn import(&self, form: MultipartForm) -> Result<ApiCall, ManagementError> {
        let path = self.base("import")?.join("import");
        let body = multipart_body(RESOURCE, "import", form)?;
        self.core.post(path, Some(body))
    }

    /// Imports a file over an existing entry: `POST .../entries/{uid}/import`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn import_existing(&self, form: MultipartForm) -> Result<ApiCall, ManagementError> {
        let path = self.item("import_existing")?.join("import");
        let body = multipart_body(RESOURCE, "import_existing", form)?;
        self.core.post(path, Some(body))
    }

    /// Publishes an entry: `POST .../entries/{uid}/publish`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn publish<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("publish")?.join("publish");
        let body = json_body(RESOURCE, "publish", body)?;
        self.core.post(path, Some(body))
    }

    /// Unpublishes an entry: `POST .../entries/{uid}/unpublish`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn unpublish<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("unpublish")?.join("unpublish");
        let body = json_body(RESOURCE, "unpublish", body)?;
        self.core.post(path, Some(body))
    }

    /// Moves an entry to a workflow stage: `POST .../entries/{uid}/workflow`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn set_workflow_stage<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("set_workflow_stage")?.join("workflow");
        let body = json_body(RESOURCE, "set_workflow_stage", body)?;
        self.core.post(path, Some(body))
    }

    /// Approves or rejects a publish request: `POST .../entries/{uid}/workflow`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn publish_request<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("publish_request")?.join("workflow");
        let body = json_body(RESOURCE, "publish_request", body)?;
        self.core.post(path, Some(body))
    }
}
