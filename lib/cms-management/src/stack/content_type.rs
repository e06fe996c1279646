use serde::Serialize;

use super::Entry;
use super::resource::{ResourceCore, impl_resource, json_body, multipart_body};
use crate::client::{ApiCall, ApiPath, ManagementError, MultipartForm, ParamStore};

const RESOURCE: &str = "content type";

/// Handle on the content types of a stack: `/content_types`.
#[derive(Debug, Clone)]
pub struct ContentType {
    core: ResourceCore,
}

impl_resource!(ContentType);

impl ContentType {
    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("content_types")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// Returns a handle on the entries of this content type.
    pub fn entries(&self) -> Entry {
        Entry::new(self.core.child(None), self.core.uid().map(str::to_string))
    }

    /// Returns a handle on an entry of this content type.
    pub fn entry(&self, uid: impl Into<String>) -> Entry {
        Entry::new(
            self.core.child(Some(uid.into())),
            self.core.uid().map(str::to_string),
        )
    }

    /// Lists content types: `GET /content_types`.
    ///
    /// Useful parameters: `include_count`, `include_global_field_schema`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// Fetches a content type: `GET /content_types/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Creates a content type: `POST /content_types`.
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

    /// Updates a content type: `PUT /content_types/{uid}`.
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

    /// Sets the field visibility rules: `PUT /content_types/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn field_visibility_rule<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("field_visibility_rule")?;
        let body = json_body(RESOURCE, "field_visibility_rule", body)?;
        self.core.put(path, Some(body))
    }

    /// Deletes a content type: `DELETE /content_types/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Lists the content types referring to this one: `GET /content_types/{uid}/references`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn references(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("references")?.join("references"))
    }

    /// Exports the content type schema: `GET /content_types/{uid}/export`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn export(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("export")?.join("export"))
    }

    /// Imports a content type schema file: `POST /content_types/import`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for an empty form.
    pub fn import(&self, form: MultipartForm) -> Result<ApiCall, ManagementError> {
        let body = multipart_body(RESOURCE, "import", form)?;
        self.core.post(self.base().join("import"), Some(body))
    }

    /// Imports a schema file over an existing content type:
    /// `POST /content_types/import?overwrite=true`.
    ///
    /// # Errors
    ///
    /// `MissingBody` for an empty form.
    pub fn import_overwrite(&self, form: MultipartForm) -> Result<ApiCall, ManagementError> {
        let body = multipart_body(RESOURCE, "import_overwrite", form)?;
        let params = ParamStore::new().with("overwrite", true);
        self.core.send(
            http::Method::POST,
            self.base().join("import"),
            &params,
            Some(body),
        )
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use rstest::rstest;
    use serde_json::json;

    use crate::stack::Resource;
    use crate::stack::tests::stack;
    use crate::{ManagementError, MultipartForm};

    #[test]
    fn test_find_with_params() {
        let content_types = stack()
            .content_types()
            .add_param("include_count", true)
            .add_param("include_global_field_schema", true);

        let call = content_types.find().expect("should build call");

        let request = call.request();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/v3/content_types");
        assert_eq!(
            request.query(),
            Some("include_count=true&include_global_field_schema=true")
        );
        insta::assert_snapshot!(
            request.url(),
            @"https://api.contentstack.io/v3/content_types?include_count=true&include_global_field_schema=true"
        );
        assert!(request.body().is_none());
    }

    #[test]
    fn test_fetch() {
        let call = stack()
            .content_type("blog_post")
            .add_param("version", 2)
            .fetch()
            .expect("should build call");

        let request = call.request();
        assert_eq!(request.segments(), ["v3", "content_types", "blog_post"]);
        assert_eq!(request.query(), Some("version=2"));
        assert_eq!(request.headers().get("api_key"), Some("blt-api-key"));
    }

    #[rstest]
    #[case::fetch("fetch")]
    #[case::delete("delete")]
    #[case::references("references")]
    #[case::export("export")]
    fn test_uid_required(#[case] operation: &str) {
        let content_types = stack().content_types();

        let result = match operation {
            "fetch" => content_types.fetch(),
            "delete" => content_types.delete(),
            "references" => content_types.references(),
            _ => content_types.export(),
        };

        let error = result.expect_err("uid is required");
        assert!(matches!(
            error,
            ManagementError::MissingUid {
                resource: "content type",
                ..
            }
        ));
    }

    #[test]
    fn test_create() {
        let body = json!({"content_type": {"title": "Blog", "uid": "blog"}});

        let call = stack()
            .content_types()
            .create(&body)
            .expect("should build call");

        let request = call.request();
        assert_eq!(request.method(), Method::POST);
        assert_eq!(request.path(), "/v3/content_types");
        assert_eq!(request.body().and_then(|it| it.as_json()), Some(&body));
    }

    #[test]
    fn test_update_requires_body() {
        let error = stack()
            .content_type("blog")
            .update(&serde_json::Value::Null)
            .expect_err("body is required");

        insta::assert_snapshot!(error, @"content type update requires a request body");
    }

    #[test]
    fn test_field_visibility_rule() {
        let body = json!({"content_type": {"field_rules": []}});

        let call = stack()
            .content_type("blog")
            .field_visibility_rule(&body)
            .expect("should build call");

        assert_eq!(call.request().method(), Method::PUT);
        assert_eq!(call.request().path(), "/v3/content_types/blog");
    }

    #[test]
    fn test_references_and_export() {
        let content_type = stack().content_type("blog");

        let references = content_type.references().expect("should build call");
        let export = content_type.export().expect("should build call");

        assert_eq!(references.request().path(), "/v3/content_types/blog/references");
        assert_eq!(export.request().path(), "/v3/content_types/blog/export");
    }

    #[test]
    fn test_import_overwrite() {
        let form = MultipartForm::new().file(
            "content_type",
            "blog.json",
            mime::APPLICATION_JSON,
            br#"{"title": "Blog"}"#.to_vec(),
        );

        let call = stack()
            .content_types()
            .import_overwrite(form)
            .expect("should build call");

        let request = call.request();
        assert_eq!(request.path(), "/v3/content_types/import");
        assert_eq!(request.query(), Some("overwrite=true"));
        assert!(request.body().and_then(|it| it.as_multipart()).is_some());
    }

    #[test]
    fn test_import_requires_file() {
        let result = stack().content_types().import(MultipartForm::new());

        assert!(matches!(result, Err(ManagementError::MissingBody { .. })));
    }
}
