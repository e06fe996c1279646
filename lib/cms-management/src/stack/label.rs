use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body};
use crate::client::{ApiCall, ApiPath, ManagementError};

const RESOURCE: &str = "label";

/// Handle on the labels of a stack: `/labels`.
#[derive(Debug, Clone)]
pub struct Label {
    core: ResourceCore,
}

impl_resource!(Label);

impl Label {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("labels")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// `GET /labels`
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// `GET /labels/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// `POST /labels`
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

    /// `PUT /labels/{uid}`
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

    /// `DELETE /labels/{uid}`
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use serde::Serialize;

    use crate::stack::Resource;
    use crate::stack::tests::stack;

    #[derive(Serialize)]
    struct LabelBody<'a> {
        label: NewLabel<'a>,
    }

    #[derive(Serialize)]
    struct NewLabel<'a> {
        name: &'a str,
        content_types: Vec<&'a str>,
    }

    #[test]
    fn test_create_from_struct() {
        let body = LabelBody {
            label: NewLabel {
                name: "Marketing",
                content_types: vec!["blog_post"],
            },
        };

        let call = stack().labels().create(&body).expect("should build call");

        let json = call
            .request()
            .body()
            .and_then(|it| it.as_json())
            .map(ToString::to_string)
            .unwrap_or_default();
        insta::assert_snapshot!(json, @r#"{"label":{"content_types":["blog_post"],"name":"Marketing"}}"#);
    }

    #[test]
    fn test_find_params() {
        let labels = stack()
            .labels()
            .add_params([("include_count", true), ("include_branch", false)]);

        let call = labels.find().expect("should build call");

        assert_eq!(call.request().method(), Method::GET);
        assert_eq!(
            call.request().query(),
            Some("include_count=true&include_branch=false")
        );
    }

    #[test]
    fn test_update_and_delete() {
        let label = stack().label("blt-label");

        let update = label
            .update(&serde_json::json!({"label": {"name": "Sales"}}))
            .expect("should build call");
        let delete = label.delete().expect("should build call");

        assert_eq!(update.request().method(), Method::PUT);
        assert_eq!(delete.request().path(), "/v3/labels/blt-label");
    }
}
