use super::resource::{ResourceCore, impl_resource};
use crate::client::{ApiCall, ApiPath, ManagementError};

const RESOURCE: &str = "publish queue item";

/// Handle on the publish queue of a stack: `/publish-queue`.
#[derive(Debug, Clone)]
pub struct PublishQueue {
    core: ResourceCore,
}

impl_resource!(PublishQueue);

impl PublishQueue {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("publish-queue")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// `GET /publish-queue`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /publish-queue/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Cancels a scheduled publish or unpublish: `GET /publish-queue/{uid}/unschedule`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn cancel_scheduled_action(&self) -> Result<ApiCall, ManagementError> {
        let path = self.item("cancel_scheduled_action")?.join("unschedule");
        self.core.get(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::stack::Resource;
    use crate::stack::tests::stack;

    #[test]
    fn test_find_with_filters() {
        let call = stack()
            .publish_queue()
            .add_param("include_count", true)
            .add_param("type", "entry")
            .find()
            .expect("should build call");

        assert_eq!(call.request().path(), "/v3/publish-queue");
        assert_eq!(call.request().query(), Some("include_count=true&type=entry"));
    }

    #[test]
    fn test_cancel_scheduled_action() {
        let call = stack()
            .publish_queue_item("blt-queue")
            .cancel_scheduled_action()
            .expect("should build call");

        assert_eq!(call.request().path(), "/v3/publish-queue/blt-queue/unschedule");
    }

    #[test]
    fn test_cancel_requires_uid() {
        let error = stack()
            .publish_queue()
            .cancel_scheduled_action()
            .expect_err("uid is required");

        insta::assert_snapshot!(
            error,
            @"publish queue item UID must be set before calling cancel_scheduled_action"
        );
    }
}
