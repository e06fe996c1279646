use std::fmt;

use http::Method;
use serde::Serialize;
use serde_json::json;

use super::resource::{ResourceCore, impl_resource, json_body, require_value};
use crate::client::{ApiCall, ApiPath, ManagementError, ParamStore};

/// Handle on the branches of a stack: `/stacks/branches`.
///
/// `delete` accepts the optional `force` parameter.
#[derive(Debug, Clone)]
pub struct Branch {
    core: ResourceCore,
}

impl_resource!(Branch);

impl Branch {
    const RESOURCE: &'static str = "branch";

    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("stacks").join("branches")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(Self::RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// Lists branches: `GET /stacks/branches`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// Fetches a branch: `GET /stacks/branches/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Creates a branch: `POST /stacks/branches`.
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

    /// Deletes a branch: `DELETE /stacks/branches/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }
}

/// Handle on the branch aliases of a stack: `/stacks/branch_aliases`.
#[derive(Debug, Clone)]
pub struct BranchAlias {
    core: ResourceCore,
}

impl_resource!(BranchAlias);

impl BranchAlias {
    const RESOURCE: &'static str = "branch alias";

    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("stacks").join("branch_aliases")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(Self::RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// Lists branch aliases: `GET /stacks/branch_aliases`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// Fetches a branch alias: `GET /stacks/branch_aliases/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Points the alias to a branch: `PUT /stacks/branch_aliases/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the alias or the target branch is not usable.
    pub fn update(&self, target_branch: &str) -> Result<ApiCall, ManagementError> {
        let path = self.item("update")?;
        let target_branch = require_value(Branch::RESOURCE, target_branch)?;
        let body = json!({ "branch_alias": { "target_branch": target_branch } });
        let body = json_body(Self::RESOURCE, "update", &body)?;
        self.core.put(path, Some(body))
    }

    /// Deletes a branch alias: `DELETE /stacks/branch_aliases/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }
}

/// Handle comparing two branches: `/stacks/branches_compare`.
///
/// Every call carries the `base_branch` and `compare_branch` parameters. `skip` and
/// `limit` can be added with [`add_param`](super::Resource::add_param).
#[derive(Debug, Clone)]
pub struct BranchCompare {
    core: ResourceCore,
    base_branch: String,
    compare_branch: String,
}

impl_resource!(BranchCompare);

impl BranchCompare {
    pub(crate) fn new(core: ResourceCore, base_branch: String, compare_branch: String) -> Self {
        Self {
            core,
            base_branch,
            compare_branch,
        }
    }

    fn base(&self) -> ApiPath {
        self.core.path("stacks").join("branches_compare")
    }

    fn compare(&self, path: ApiPath) -> Result<ApiCall, ManagementError> {
        let params = ParamStore::new()
            .with(
                "base_branch",
                require_value("base branch", &self.base_branch)?,
            )
            .with(
                "compare_branch",
                require_value("compare branch", &self.compare_branch)?,
            );
        self.core.get_with(path, &params)
    }

    /// Compares every item: `GET /stacks/branches_compare`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` when a branch name is blank.
    pub fn all(&self) -> Result<ApiCall, ManagementError> {
        self.compare(self.base())
    }

    /// Compares content types: `GET /stacks/branches_compare/content_types`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` when a branch name is blank.
    pub fn content_types(&self) -> Result<ApiCall, ManagementError> {
        self.compare(self.base().join("content_types"))
    }

    /// Compares global fields: `GET /stacks/branches_compare/global_fields`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` when a branch name is blank.
    pub fn global_fields(&self) -> Result<ApiCall, ManagementError> {
        self.compare(self.base().join("global_fields"))
    }

    /// Compares one content type: `GET /stacks/branches_compare/content_types/{uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` when a branch name or the UID is blank.
    pub fn specific_content_type(&self, uid: &str) -> Result<ApiCall, ManagementError> {
        let uid = require_value("content type", uid)?;
        self.compare(self.base().join("content_types").join(uid))
    }

    /// Compares one global field: `GET /stacks/branches_compare/global_fields/{uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` when a branch name or the UID is blank.
    pub fn specific_global_field(&self, uid: &str) -> Result<ApiCall, ManagementError> {
        let uid = require_value("global field", uid)?;
        self.compare(self.base().join("global_fields").join(uid))
    }
}

/// How conflicting items are resolved when merging branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeStrategy {
    /// Keep the base branch version on conflicts.
    MergePreferBase,
    /// Keep the compare branch version on conflicts.
    MergePreferCompare,
    /// Replace the base branch items with the compare branch ones.
    OverwriteWithCompare,
    /// Only merge the items selected in `item_merge_strategies`.
    Ignore,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::MergePreferBase => "merge_prefer_base",
            Self::MergePreferCompare => "merge_prefer_compare",
            Self::OverwriteWithCompare => "overwrite_with_compare",
            Self::Ignore => "ignore",
        };
        f.write_str(value)
    }
}

/// Handle on branch merges: `/stacks/branches_merge` and `/stacks/branches_queue`.
#[derive(Debug, Clone)]
pub struct BranchMerge {
    core: ResourceCore,
}

impl_resource!(BranchMerge);

impl BranchMerge {
    const RESOURCE: &'static str = "branch merge";

    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    /// Merges `compare_branch` into `base_branch`: `POST /stacks/branches_merge`.
    ///
    /// The body holds the `item_merge_strategies`; a `merge_comment` parameter can be
    /// added on the handle.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank branch name, `MissingBody` for a `null` body.
    pub fn merge<T>(
        &self,
        base_branch: &str,
        compare_branch: &str,
        strategy: MergeStrategy,
        body: &T,
    ) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let params = ParamStore::new()
            .with("base_branch", require_value("base branch", base_branch)?)
            .with(
                "compare_branch",
                require_value("compare branch", compare_branch)?,
            )
            .with("default_merge_strategy", strategy.to_string());
        let body = json_body(Self::RESOURCE, "merge", body)?;
        let path = self.core.path("stacks").join("branches_merge");
        self.core.send(Method::POST, path, &params, Some(body))
    }

    /// Lists merge jobs: `GET /stacks/branches_queue`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn queue(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.core.path("stacks").join("branches_queue"))
    }

    /// Fetches a merge job: `GET /stacks/branches_queue/{job_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank job UID.
    pub fn queue_job(&self, job_uid: &str) -> Result<ApiCall, ManagementError> {
        let job_uid = require_value("merge job", job_uid)?;
        let path = self.core.path("stacks").join("branches_queue").join(job_uid);
        self.core.get(path)
    }
}
