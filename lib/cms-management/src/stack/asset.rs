use http::Method;
use serde::Serialize;
use serde_json::json;

use super::resource::{ResourceCore, impl_resource, json_body, multipart_body, require_value};
use crate::client::{ApiCall, ApiPath, ManagementError, MultipartForm, ParamStore};

const RESOURCE: &str = "asset";
const FOLDER: &str = "folder";

/// Handle on the assets of a stack: `/assets`.
///
/// Uploads are multipart forms, with fields named `asset[upload]`, `asset[title]`,
/// `asset[description]`, `asset[parent_uid]` and `asset[tags]`.
///
/// ```rust
/// use cms_management::{ManagementClient, MultipartForm};
///
/// # fn example() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
/// let form = MultipartForm::new()
///     .file("asset[upload]", "logo.png", mime::IMAGE_PNG, vec![0x89_u8, 0x50, 0x4e, 0x47])
///     .text("asset[title]", "Logo");
///
/// let call = client.stack("blt-api-key").assets().upload(form)?;
/// assert_eq!(call.request().path(), "/v3/assets");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Asset {
    core: ResourceCore,
}

impl_resource!(Asset);

impl Asset {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("assets")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    fn folder(&self, folder_uid: &str) -> Result<ApiPath, ManagementError> {
        let folder_uid = require_value(FOLDER, folder_uid)?;
        Ok(self.base().join("folders").join(folder_uid))
    }

    /// Lists assets: `GET /assets`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// Fetches an asset: `GET /assets/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Lists the assets of a folder: `GET /assets?folder={folder_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank folder UID.
    pub fn by_folder(&self, folder_uid: &str) -> Result<ApiCall, ManagementError> {
        let params = ParamStore::new().with("folder", require_value(FOLDER, folder_uid)?);
        self.core.get_with(self.base(), &params)
    }

    /// Lists the subfolders of a folder:
    /// `GET /assets?folder={folder_uid}&include_folders=true`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank folder UID.
    pub fn subfolders(&self, folder_uid: &str) -> Result<ApiCall, ManagementError> {
        let params = ParamStore::new()
            .with("folder", require_value(FOLDER, folder_uid)?)
            .with("include_folders", true);
        self.core.get_with(self.base(), &params)
    }

    /// Uploads an asset: `POST /assets`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for an empty form.
    pub fn upload(&self, form: MultipartForm) -> Result<ApiCall, ManagementError> {
        let body = multipart_body(RESOURCE, "upload", form)?;
        self.core.post(self.base(), Some(body))
    }

    /// Replaces the file of an asset: `PUT /assets/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn replace(&self, form: MultipartForm) -> Result<ApiCall, ManagementError> {
        let path = self.item("replace")?;
        let body = multipart_body(RESOURCE, "replace", form)?;
        self.core.put(path, Some(body))
    }

    /// Sets the permanent URL of an asset: `PUT /assets/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn generate_permanent_url(
        &self,
        permanent_url: impl Into<String>,
    ) -> Result<ApiCall, ManagementError> {
        let path = self.item("generate_permanent_url")?;
        let body = json!({ "asset": { "permanent_url": permanent_url.into() } });
        let body = json_body(RESOURCE, "generate_permanent_url", &body)?;
        self.core.put(path, Some(body))
    }

    /// Downloads an asset through its permanent URL: `GET /assets/{uid}/{slug}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the UID or the slug is not usable.
    pub fn download_permanent_url(&self, slug: &str) -> Result<ApiCall, ManagementError> {
        let path = self
            .item("download_permanent_url")?
            .join(require_value("slug", slug)?);
        self.core.get(path)
    }

    /// Deletes an asset: `DELETE /assets/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Lists the assets usable in rich text editors: `GET /assets/rt`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn rte_information(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base().join("rt"))
    }

    /// Names a version: `POST /assets/{uid}/versions/{version}/name`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
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
        let body = json!({ "upload": { "_version_name": name.into() } });
        let body = json_body(RESOURCE, "set_version_name", &body)?;
        self.core.post(path, Some(body))
    }

    /// Lists the versions of an asset: `GET /assets/{uid}/versions`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn versions(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("versions")?.join("versions"))
    }

    /// Removes the name of a version: `DELETE /assets/{uid}/versions/{version}/name`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete_version_name(&self, version: u32) -> Result<ApiCall, ManagementError> {
        let path = self
            .item("delete_version_name")?
            .join("versions")
            .join(version.to_string())
            .join("name");
        self.core.delete(path, None)
    }

    /// Lists the entries referring to an asset: `GET /assets/{uid}/references`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn references(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("references")?.join("references"))
    }

    /// Lists the assets of a type, e.g. `images` or `videos`: `GET /assets/{asset_type}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank type.
    pub fn by_type(&self, asset_type: &str) -> Result<ApiCall, ManagementError> {
        let asset_type = require_value("asset type", asset_type)?;
        self.core.get(self.base().join(asset_type))
    }

    /// Updates the title, description or tags of an asset: `PUT /assets/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn update_details<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("update_details")?;
        let body = json_body(RESOURCE, "update_details", body)?;
        self.core.put(path, Some(body))
    }

    /// Publishes an asset: `POST /assets/{uid}/publish`.
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

    /// Unpublishes an asset: `POST /assets/{uid}/unpublish`.
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

    // Folders

    /// Fetches a folder: `GET /assets/folders/{folder_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank folder UID.
    pub fn fetch_folder(&self, folder_uid: &str) -> Result<ApiCall, ManagementError> {
        self.core.get(self.folder(folder_uid)?)
    }

    /// Creates a folder: `POST /assets/folders`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn create_folder<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(FOLDER, "create_folder", body)?;
        self.core.post(self.base().join("folders"), Some(body))
    }

    /// Updates a folder: `PUT /assets/folders/{folder_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` or `MissingBody`.
    pub fn update_folder<T>(&self, folder_uid: &str, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.folder(folder_uid)?;
        let body = json_body(FOLDER, "update_folder", body)?;
        self.core.send(Method::PUT, path, &ParamStore::new(), Some(body))
    }

    /// Deletes a folder: `DELETE /assets/folders/{folder_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank folder UID.
    pub fn delete_folder(&self, folder_uid: &str) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.folder(folder_uid)?, None)
    }
}
