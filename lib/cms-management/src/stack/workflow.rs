use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body, require_value};
use crate::client::{ApiCall, ApiPath, ManagementError};

const RESOURCE: &str = "workflow";
const PUBLISH_RULE: &str = "publish rule";

/// Handle on the workflows of a stack: `/workflows`.
///
/// Publish rules live under `/workflows/publishing_rules` and are addressed by
/// their own UID, independently of the workflow UID of the handle.
#[derive(Debug, Clone)]
pub struct Workflow {
    core: ResourceCore,
}

impl_resource!(Workflow);

impl Workflow {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("workflows")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    fn publish_rule(&self, rule_uid: &str) -> Result<ApiPath, ManagementError> {
        let rule_uid = require_value(PUBLISH_RULE, rule_uid)?;
        Ok(self.base().join("publishing_rules").join(rule_uid))
    }

    /// Lists workflows: `GET /workflows`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// Fetches a workflow: `GET /workflows/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Creates a workflow: `POST /workflows`.
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

    /// Updates a workflow: `PUT /workflows/{uid}`.
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

    /// Enables a workflow: `GET /workflows/{uid}/enable`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn enable(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("enable")?.join("enable"))
    }

    /// Disables a workflow: `GET /workflows/{uid}/disable`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn disable(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("disable")?.join("disable"))
    }

    /// Deletes a workflow: `DELETE /workflows/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Creates a publish rule: `POST /workflows/publishing_rules`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for a `null` body.
    pub fn create_publish_rule<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let body = json_body(PUBLISH_RULE, "create_publish_rule", body)?;
        self.core
            .post(self.base().join("publishing_rules"), Some(body))
    }

    /// Updates a publish rule: `PUT /workflows/publishing_rules/{rule_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` or `MissingBody`.
    pub fn update_publish_rule<T>(
        &self,
        rule_uid: &str,
        body: &T,
    ) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.publish_rule(rule_uid)?;
        let body = json_body(PUBLISH_RULE, "update_publish_rule", body)?;
        self.core.put(path, Some(body))
    }

    /// Deletes a publish rule: `DELETE /workflows/publishing_rules/{rule_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank rule UID.
    pub fn delete_publish_rule(&self, rule_uid: &str) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.publish_rule(rule_uid)?, None)
    }

    /// Fetches a publish rule: `GET /workflows/publishing_rules/{rule_uid}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank rule UID.
    pub fn fetch_publish_rule(&self, rule_uid: &str) -> Result<ApiCall, ManagementError> {
        self.core.get(self.publish_rule(rule_uid)?)
    }

    /// Lists publish rules: `GET /workflows/publishing_rules`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn fetch_publish_rules(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base().join("publishing_rules"))
    }

    /// Lists the publish rules of a content type: `GET /workflows/content_type/{content_type}`.
    ///
    /// # Errors
    ///
    /// `EmptyUid` for a blank content type UID.
    pub fn publish_rules_by_content_type(
        &self,
        content_type: &str,
    ) -> Result<ApiCall, ManagementError> {
        let content_type = require_value("content type", content_type)?;
        self.core
            .get(self.base().join("content_type").join(content_type))
    }

    /// Lists the workflow tasks assigned to the current user: `GET /user/assignments`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn tasks(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.core.path("user").join("assignments"))
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use rstest::rstest;
    use serde_json::json;

    use crate::stack::Resource;
    use crate::stack::tests::stack;
    use crate::{ApiCall, ManagementError};

    #[rstest]
    #[case::enable(stack().workflow("blt-wf").enable(), "/v3/workflows/blt-wf/enable")]
    #[case::disable(stack().workflow("blt-wf").disable(), "/v3/workflows/blt-wf/disable")]
    #[case::rules(stack().workflows().fetch_publish_rules(), "/v3/workflows/publishing_rules")]
    #[case::rule(
        stack().workflows().fetch_publish_rule("blt-rule"),
        "/v3/workflows/publishing_rules/blt-rule"
    )]
    #[case::by_content_type(
        stack().workflows().publish_rules_by_content_type("blog"),
        "/v3/workflows/content_type/blog"
    )]
    #[case::tasks(stack().workflows().tasks(), "/v3/user/assignments")]
    fn test_get_paths(#[case] call: Result<ApiCall, ManagementError>, #[case] expected: &str) {
        let call = call.expect("should build call");

        assert_eq!(call.request().method(), Method::GET);
        assert_eq!(call.request().path(), expected);
    }

    #[test]
    fn test_publish_rule_lifecycle() {
        let workflows = stack().workflows();
        let body = json!({"publishing_rule": {"action": "publish", "environment": "production"}});

        let create = workflows
            .create_publish_rule(&body)
            .expect("should build call");
        let update = workflows
            .update_publish_rule("blt-rule", &body)
            .expect("should build call");
        let delete = workflows
            .delete_publish_rule("blt-rule")
            .expect("should build call");

        assert_eq!(create.request().method(), Method::POST);
        assert_eq!(update.request().method(), Method::PUT);
        assert_eq!(delete.request().method(), Method::DELETE);
        assert_eq!(delete.request().path(), update.request().path());
    }

    #[test]
    fn test_by_content_type_with_params() {
        let call = stack()
            .workflows()
            .add_param("action", "publish")
            .add_param("locale", "en-us")
            .publish_rules_by_content_type("blog")
            .expect("should build call");

        assert_eq!(call.request().query(), Some("action=publish&locale=en-us"));
    }

    #[test]
    fn test_enable_requires_uid() {
        let error = stack().workflows().enable().expect_err("uid is required");

        insta::assert_snapshot!(error, @"workflow UID must be set before calling enable");
    }
}
