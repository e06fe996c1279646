use serde::Serialize;

use super::Resource;
use super::resource::{ResourceCore, impl_resource, json_body, require_value};
use crate::client::{ApiCall, ApiPath, ManagementError};

const RESOURCE: &str = "bulk operation";

/// Handle on bulk operations: `/bulk`.
///
/// Every operation requires a body listing the entries and assets it applies to.
/// Publishing accepts the `skip_workflow_stage_check` and `approvals` parameters,
/// see [`skip_workflow_stage_check`](Self::skip_workflow_stage_check) and
/// [`approvals`](Self::approvals).
///
/// ```rust
/// use cms_management::ManagementClient;
/// use serde_json::json;
///
/// # fn example() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
/// let body = json!({
///     "entries": [{"uid": "blt-entry", "content_type": "blog_post", "locale": "en-us"}],
///     "locales": ["en-us"],
///     "environments": ["production"]
/// });
///
/// let call = client
///     .stack("blt-api-key")
///     .bulk_operation()
///     .skip_workflow_stage_check(true)
///     .approvals(true)
///     .publish(&body)?;
///
/// assert_eq!(call.request().path(), "/v3/bulk/publish");
/// assert_eq!(call.request().query(), Some("skip_workflow_stage_check=true&approvals=true"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BulkOperation {
    core: ResourceCore,
}

impl_resource!(BulkOperation);

impl BulkOperation {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("bulk")
    }

    /// Sets the `skip_workflow_stage_check` parameter.
    #[must_use]
    pub fn skip_workflow_stage_check(self, skip: bool) -> Self {
        self.add_param("skip_workflow_stage_check", skip)
    }

    /// Sets the `approvals` parameter.
    #[must_use]
    pub fn approvals(self, approvals: bool) -> Self {
        self.add_param("approvals", approvals)
    }

    /// Publishes entries and assets: `POST /bulk/publish`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn publish<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "publish", body)?;
        self.core.post(self.base().join("publish"), Some(body))
    }

    /// Unpublishes entries and assets: `POST /bulk/unpublish`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn unpublish<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "unpublish", body)?;
        self.core.post(self.base().join("unpublish"), Some(body))
    }

    /// Deletes entries and assets: `POST /bulk/delete`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn delete<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "delete", body)?;
        self.core.post(self.base().join("delete"), Some(body))
    }

    /// Moves entries to a workflow stage: `POST /bulk/workflow`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn update_workflow<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "update_workflow", body)?;
        self.core.post(self.base().join("workflow"), Some(body))
    }

    /// Adds items to a release: `POST /bulk/release/items`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn add_release_items<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "add_release_items", body)?;
        let path = self.base().join("release").join("items");
        self.core.post(path, Some(body))
    }

    /// Updates the items of a release: `PUT /bulk/release/update_items`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn update_release_items<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "update_release_items", body)?;
        let path = self.base().join("release").join("update_items");
        self.core.put(path, Some(body))
    }

    /// Fetches the status of a bulk job: `GET /bulk/jobs/{job_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank job UID.
    pub fn job_status(&self, job_uid: &str) -> Result<ApiCall, ManagementError> {
        let job_uid = require_value("bulk job", job_uid)?;
        self.core.get(self.base().join("jobs").join(job_uid))
    }
}
