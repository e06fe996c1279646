//! Resource handles of a stack.
//!
//! A [`Stack`] is created from a [`ManagementClient`] and hands out one handle per
//! resource. Every handle receives a copy of the stack headers, so headers added on
//! a handle never leak to its siblings.

use serde::Serialize;
use serde_json::json;

use crate::client::{
    ApiCall, Credentials, HeaderStore, ManagementClient, ManagementError, ParamStore,
};

pub(crate) mod resource;
use self::resource::{ResourceCore, impl_resource, json_body, require_value};
pub use self::resource::Resource;

mod asset;
pub use self::asset::Asset;

mod audit_log;
pub use self::audit_log::AuditLog;

mod branch;
pub use self::branch::{Branch, BranchAlias, BranchCompare, BranchMerge, MergeStrategy};

mod bulk_operation;
pub use self::bulk_operation::BulkOperation;

mod content_type;
pub use self::content_type::ContentType;

mod entry;
pub use self::entry::Entry;

mod environment;
pub use self::environment::Environment;

mod extension;
pub use self::extension::Extension;

mod global_field;
pub use self::global_field::{API_VERSION_HEADER, GlobalField};

mod label;
pub use self::label::Label;

mod locale;
pub use self::locale::Locale;

mod publish_queue;
pub use self::publish_queue::PublishQueue;

mod release;
pub use self::release::{Release, ReleaseItem};

mod role;
pub use self::role::Role;

mod taxonomy;
pub use self::taxonomy::{Taxonomy, Terms};

mod tokens;
pub use self::tokens::{DeliveryToken, ManagementToken};

mod variant_group;
pub use self::variant_group::VariantGroup;

mod workflow;
pub use self::workflow::Workflow;

/// Header selecting the branch of a stack.
pub const BRANCH_HEADER: &str = "branch";

const ORGANIZATION_UID_HEADER: &str = "organization_uid";
const RESOURCE: &str = "stack";

/// Handle on a stack, and entry point to its resources.
///
/// ```rust
/// use cms_management::{ManagementClient, Resource};
///
/// # fn example() -> Result<(), cms_management::ManagementError> {
/// let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
/// let stack = client.stack("blt-api-key").with_branch("development");
///
/// let call = stack.content_type("blog_post").fetch()?;
/// assert_eq!(call.request().path(), "/v3/content_types/blog_post");
/// assert_eq!(call.request().headers().get("branch"), Some("development"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Stack {
    core: ResourceCore,
}

impl_resource!(Stack);

impl Stack {
    pub(crate) fn new(
        client: ManagementClient,
        headers: HeaderStore,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            core: ResourceCore::new(client, headers, None).with_credentials(credentials),
        }
    }

    /// Targets a branch for every handle created afterwards.
    #[must_use]
    pub fn with_branch(self, branch: impl Into<String>) -> Self {
        self.add_header(BRANCH_HEADER, branch)
    }

    /// Returns the stack API key, when set.
    pub fn api_key(&self) -> Option<&str> {
        self.headers().get(crate::client::API_KEY_HEADER)
    }

    // Stack operations

    /// Fetches the stack details: `GET /stacks`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.core.path("stacks"))
    }

    /// Creates a stack in an organization: `POST /stacks`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank organization UID, `MissingBody` for a `null` body.
    pub fn create<T>(&self, organization_uid: &str, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let organization_uid = require_value("organization", organization_uid)?;
        let body = json_body(RESOURCE, "create", body)?;
        let call = self.core.post(self.core.path("stacks"), Some(body))?;
        Ok(call.with_header(ORGANIZATION_UID_HEADER, organization_uid))
    }

    /// Updates the stack: `PUT /stacks`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn update<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "update", body)?;
        self.core.put(self.core.path("stacks"), Some(body))
    }

    /// Transfers the stack ownership: `POST /stacks/transfer_ownership`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn transfer_ownership<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "transfer_ownership", body)?;
        let path = self.core.path("stacks").join("transfer_ownership");
        self.core.post(path, Some(body))
    }

    /// Accepts an ownership transfer: `GET /stacks/accept_ownership/{token}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank token or user UID.
    pub fn accept_ownership(
        &self,
        ownership_token: &str,
        user_uid: &str,
    ) -> Result<ApiCall, ManagementError> {
        let ownership_token = require_value("ownership token", ownership_token)?;
        let user_uid = require_value("user", user_uid)?;

        let mut params = ParamStore::new();
        if let Some(api_key) = self.api_key() {
            params.insert("api_key", api_key);
        }
        params.insert("uid", user_uid);

        let path = self
            .core
            .path("stacks")
            .join("accept_ownership")
            .join(ownership_token);
        self.core.get_with(path, &params)
    }

    /// Fetches the stack settings: `GET /stacks/settings`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn settings(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.core.path("stacks").join("settings"))
    }

    /// Updates the stack settings: `POST /stacks/settings`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn update_settings<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "update_settings", body)?;
        self.core
            .post(self.core.path("stacks").join("settings"), Some(body))
    }

    /// Resets the stack settings to their defaults: `POST /stacks/settings`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn reset_settings(&self) -> Result<ApiCall, ManagementError> {
        let body = json!({
            "stack_settings": {
                "discrete_variables": {},
                "stack_variables": {},
                "rte": {}
            }
        });
        let body = json_body(RESOURCE, "reset_settings", &body)?;
        self.core
            .post(self.core.path("stacks").join("settings"), Some(body))
    }

    /// Shares the stack with users: `POST /stacks/share`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn share<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "share", body)?;
        self.core.post(self.core.path("stacks").join("share"), Some(body))
    }

    /// Removes a user from the stack: `POST /stacks/unshare`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank email.
    pub fn unshare(&self, email: &str) -> Result<ApiCall, ManagementError> {
        let email = require_value("user email", email)?;
        let body = json_body(RESOURCE, "unshare", &json!({ "email": email }))?;
        self.core
            .post(self.core.path("stacks").join("unshare"), Some(body))
    }

    /// Lists the stack collaborators: `GET /stacks?include_collaborators=true`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn users(&self) -> Result<ApiCall, ManagementError> {
        let params = ParamStore::new().with("include_collaborators", true);
        self.core.get_with(self.core.path("stacks"), &params)
    }

    /// Updates the roles of existing users: `POST /stacks/users/roles`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn update_user_roles<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(RESOURCE, "update_user_roles", body)?;
        let path = self.core.path("stacks").join("users").join("roles");
        self.core.post(path, Some(body))
    }

    // Resources

    /// Returns a handle on all content types.
    pub fn content_types(&self) -> ContentType {
        ContentType::new(self.core.child(None))
    }

    /// Returns a handle on a content type.
    pub fn content_type(&self, uid: impl Into<String>) -> ContentType {
        ContentType::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all assets.
    pub fn assets(&self) -> Asset {
        Asset::new(self.core.child(None))
    }

    /// Returns a handle on an asset.
    pub fn asset(&self, uid: impl Into<String>) -> Asset {
        Asset::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all branches.
    pub fn branches(&self) -> Branch {
        Branch::new(self.core.child(None))
    }

    /// Returns a handle on a branch.
    pub fn branch(&self, uid: impl Into<String>) -> Branch {
        Branch::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all branch aliases.
    pub fn branch_aliases(&self) -> BranchAlias {
        BranchAlias::new(self.core.child(None))
    }

    /// Returns a handle on a branch alias.
    pub fn branch_alias(&self, uid: impl Into<String>) -> BranchAlias {
        BranchAlias::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle comparing `compare_branch` against `base_branch`.
    pub fn branch_compare(
        &self,
        base_branch: impl Into<String>,
        compare_branch: impl Into<String>,
    ) -> BranchCompare {
        BranchCompare::new(self.core.child(None), base_branch.into(), compare_branch.into())
    }

    /// Returns a handle on branch merges and the merge queue.
    pub fn branch_merge(&self) -> BranchMerge {
        BranchMerge::new(self.core.child(None))
    }

    /// Returns a handle on all taxonomies.
    pub fn taxonomies(&self) -> Taxonomy {
        Taxonomy::new(self.core.child(None))
    }

    /// Returns a handle on a taxonomy.
    pub fn taxonomy(&self, uid: impl Into<String>) -> Taxonomy {
        Taxonomy::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all global fields.
    pub fn global_fields(&self) -> GlobalField {
        GlobalField::new(self.core.child(None))
    }

    /// Returns a handle on a global field.
    pub fn global_field(&self, uid: impl Into<String>) -> GlobalField {
        GlobalField::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all releases.
    pub fn releases(&self) -> Release {
        Release::new(self.core.child(None))
    }

    /// Returns a handle on a release.
    pub fn release(&self, uid: impl Into<String>) -> Release {
        Release::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all workflows.
    pub fn workflows(&self) -> Workflow {
        Workflow::new(self.core.child(None))
    }

    /// Returns a handle on a workflow.
    pub fn workflow(&self, uid: impl Into<String>) -> Workflow {
        Workflow::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all delivery tokens.
    pub fn delivery_tokens(&self) -> DeliveryToken {
        DeliveryToken::new(self.core.child(None))
    }

    /// Returns a handle on a delivery token.
    pub fn delivery_token(&self, uid: impl Into<String>) -> DeliveryToken {
        DeliveryToken::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all management tokens.
    pub fn management_tokens(&self) -> ManagementToken {
        ManagementToken::new(self.core.child(None))
    }

    /// Returns a handle on a management token.
    pub fn management_token(&self, uid: impl Into<String>) -> ManagementToken {
        ManagementToken::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all labels.
    pub fn labels(&self) -> Label {
        Label::new(self.core.child(None))
    }

    /// Returns a handle on a label.
    pub fn label(&self, uid: impl Into<String>) -> Label {
        Label::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all roles.
    pub fn roles(&self) -> Role {
        Role::new(self.core.child(None))
    }

    /// Returns a handle on a role.
    pub fn role(&self, uid: impl Into<String>) -> Role {
        Role::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on all locales.
    pub fn locales(&self) -> Locale {
        Locale::new(self.core.child(None))
    }

    /// Returns a handle on a locale, identified by its code (e.g. `fr-fr`).
    pub fn locale(&self, code: impl Into<String>) -> Locale {
        Locale::new(self.core.child(Some(code.into())))
    }

    /// Returns a handle on all environments.
    pub fn environments(&self) -> Environment {
        Environment::new(self.core.child(None))
    }

    /// Returns a handle on an environment, identified by its name.
    pub fn environment(&self, name: impl Into<String>) -> Environment {
        Environment::new(self.core.child(Some(name.into())))
    }

    /// Returns a handle on all extensions.
    pub fn extensions(&self) -> Extension {
        Extension::new(self.core.child(None))
    }

    /// Returns a handle on an extension.
    pub fn extension(&self, uid: impl Into<String>) -> Extension {
        Extension::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on the publish queue.
    pub fn publish_queue(&self) -> PublishQueue {
        PublishQueue::new(self.core.child(None))
    }

    /// Returns a handle on a publish queue item.
    pub fn publish_queue_item(&self, uid: impl Into<String>) -> PublishQueue {
        PublishQueue::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on the audit log.
    pub fn audit_logs(&self) -> AuditLog {
        AuditLog::new(self.core.child(None))
    }

    /// Returns a handle on an audit log item.
    pub fn audit_log(&self, uid: impl Into<String>) -> AuditLog {
        AuditLog::new(self.core.child(Some(uid.into())))
    }

    /// Returns a handle on bulk operations.
    pub fn bulk_operation(&self) -> BulkOperation {
        BulkOperation::new(self.core.child(None))
    }

    /// Returns a handle on all variant groups.
    pub fn variant_groups(&self) -> VariantGroup {
        VariantGroup::new(self.core.child(None))
    }

    /// Returns a handle on a variant group.
    pub fn variant_group(&self, uid: impl Into<String>) -> VariantGroup {
        VariantGroup::new(self.core.child(Some(uid.into())))
    }
}

#[cfg(test)]
mod tests;
