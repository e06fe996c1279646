use serde_json::json;

use super::resource::{ResourceCore, impl_resource, json_body, require_value};
use crate::client::{ApiCall, ApiPath, ManagementError};

const RESOURCE: &str = "variant group";

/// Handle on the variant groups of a stack: `/variant_groups`.
///
/// `fetch`, `delete` and the content type links need a variant group UID.
#[derive(Debug, Clone)]
pub struct VariantGroup {
    core: ResourceCore,
}

impl_resource!(VariantGroup);

impl VariantGroup {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("variant_groups")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// `GET /variant_groups`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /variant_groups/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// `DELETE /variant_groups/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Links content types to the variant group: `PUT /variant_groups/{uid}/variants`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn link_content_types(&self, content_types: &[&str]) -> Result<ApiCall, ManagementError> {
        self.content_type_links("link_content_types", content_types, true)
    }

    /// Unlinks content types from the variant group: `PUT /variant_groups/{uid}/variants`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn unlink_content_types(
        &self,
        content_types: &[&str],
    ) -> Result<ApiCall, ManagementError> {
        self.content_type_links("unlink_content_types", content_types, false)
    }

    fn content_type_links(
        &self,
        operation: &'static str,
        content_types: &[&str],
        linked: bool,
    ) -> Result<ApiCall, ManagementError> {
        let path = self.item(operation)?.join("variants");
        let content_types = content_types
            .iter()
            .map(|uid| {
                let uid = require_value("content type", uid)?;
                Ok(json!({ "uid": uid, "status": if linked { "linked" } else { "unlinked" } }))
            })
            .collect::<Result<Vec<_>, ManagementError>>()?;
        let body = json!({ "content_types": content_types });
        let body = json_body(RESOURCE, operation, &body)?;
        self.core.put(path, Some(body))
    }
}
