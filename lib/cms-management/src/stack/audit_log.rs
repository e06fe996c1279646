use super::resource::{ResourceCore, impl_resource};
use crate::client::{ApiCall, ManagementError};

const RESOURCE: &str = "audit log item";

/// Handle on the audit log of a stack: `/audit-logs`.
#[derive(Debug, Clone)]
pub struct AuditLog {
    core: ResourceCore,
}

impl_resource!(AuditLog);

impl AuditLog {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    /// `GET /audit-logs`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.core.path("audit-logs"))
    }

    /// `GET /audit-logs/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, "fetch")?;
        self.core.get(self.core.path("audit-logs").join(uid))
    }
}
