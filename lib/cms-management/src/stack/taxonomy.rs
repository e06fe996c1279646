use serde::Serialize;

use super::resource::{ResourceCore, impl_resource, json_body, require_value};
use crate::client::{ApiCall, ApiPath, ManagementError, ParamStore};

/// Pseudo taxonomy UID searching the terms of every taxonomy.
const ALL_TAXONOMIES: &str = "$all";

/// Handle on the taxonomies of a stack: `/taxonomies`.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    core: ResourceCore,
}

impl_resource!(Taxonomy);

impl Taxonomy {
    const RESOURCE: &'static str = "taxonomy";

    pub(crate) fn new(core: ResourceCore) -> Self {
        Self { core }
    }

    fn base(&self) -> ApiPath {
        self.core.path("taxonomies")
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let uid = self.core.require_uid(Self::RESOURCE, operation)?;
        Ok(self.base().join(uid))
    }

    /// Returns a handle on the terms of this taxonomy.
    pub fn terms(&self) -> Terms {
        Terms::new(self.core.child(None), self.core.uid().map(str::to_string))
    }

    /// Returns a handle on a term of this taxonomy.
    pub fn term(&self, uid: impl Into<String>) -> Terms {
        Terms::new(
            self.core.child(Some(uid.into())),
            self.core.uid().map(str::to_string),
        )
    }

    /// Lists taxonomies: `GET /taxonomies`.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base())
    }

    /// Fetches a taxonomy: `GET /taxonomies/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Creates a taxonomy: `POST /taxonomies`.
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

    /// Updates a taxonomy: `PUT /taxonomies/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn update<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("update")?;
        let body = json_body(Self::RESOURCE, "update", body)?;
        self.core.put(path, Some(body))
    }

    /// Deletes a taxonomy: `DELETE /taxonomies/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Exports a taxonomy with its terms: `GET /taxonomies/{uid}/export`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the handle has no usable UID.
    pub fn export(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("export")?.join("export"))
    }
}

/// Handle on the terms of a taxonomy: `/taxonomies/{taxonomy}/terms`.
#[derive(Debug, Clone)]
pub struct Terms {
    core: ResourceCore,
    taxonomy: Option<String>,
}

impl_resource!(Terms);

impl Terms {
    const RESOURCE: &'static str = "term";

    pub(crate) fn new(core: ResourceCore, taxonomy: Option<String>) -> Self {
        Self { core, taxonomy }
    }

    /// Returns the UID of the parent taxonomy.
    pub fn taxonomy_uid(&self) -> Option<&str> {
        self.taxonomy.as_deref()
    }

    fn base(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let Some(taxonomy) = self.taxonomy.as_deref() else {
            return Err(ManagementError::MissingUid {
                resource: Taxonomy::RESOURCE,
                operation,
            });
        };
        let taxonomy = require_value(Taxonomy::RESOURCE, taxonomy)?;
        Ok(self.core.path("taxonomies").join(taxonomy).join("terms"))
    }

    fn item(&self, operation: &'static str) -> Result<ApiPath, ManagementError> {
        let base = self.base(operation)?;
        let uid = self.core.require_uid(Self::RESOURCE, operation)?;
        Ok(base.join(uid))
    }

    /// Lists terms: `GET /taxonomies/{taxonomy}/terms`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when the taxonomy UID is not usable.
    pub fn find(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.base("find")?)
    }

    /// Fetches a term: `GET /taxonomies/{taxonomy}/terms/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn fetch(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("fetch")?)
    }

    /// Creates a term: `POST /taxonomies/{taxonomy}/terms`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn create<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.base("create")?;
        let body = json_body(Self::RESOURCE, "create", body)?;
        self.core.post(path, Some(body))
    }

    /// Updates a term: `PUT /taxonomies/{taxonomy}/terms/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn update<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("update")?;
        let body = json_body(Self::RESOURCE, "update", body)?;
        self.core.put(path, Some(body))
    }

    /// Deletes a term: `DELETE /taxonomies/{taxonomy}/terms/{uid}`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn delete(&self) -> Result<ApiCall, ManagementError> {
        self.core.delete(self.item("delete")?, None)
    }

    /// Lists the descendants of a term: `GET .../terms/{uid}/descendants`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn descendants(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("descendants")?.join("descendants"))
    }

    /// Lists the ancestors of a term: `GET .../terms/{uid}/ancestors`.
    ///
    /// # Errors
    ///
    /// `MissingUid` or `EmptyUid` when a UID is not usable.
    pub fn ancestors(&self) -> Result<ApiCall, ManagementError> {
        self.core.get(self.item("ancestors")?.join("ancestors"))
    }

    /// Moves a term under another parent: `PUT .../terms/{uid}/move`.
    ///
    /// # Errors
    ///
    /// `MissingUid`, `EmptyUid` or `MissingBody`.
    pub fn move_term<T>(&self, body: &T) -> Result<ApiCall, ManagementError>
    where
        T: Serialize + ?Sized,
    {
        let path = self.item("move_term")?.join("move");
        let body = json_body(Self::RESOURCE, "move_term", body)?;
        self.core.put(path, Some(body))
    }

    /// Searches terms across every taxonomy: `GET /taxonomies/$all/terms?typeahead=...`.
    ///
    /// The taxonomy of this handle is ignored.
    ///
    /// # Errors
    ///
    /// Fails when the call can not be built.
    pub fn search(&self, typeahead: &str) -> Result<ApiCall, ManagementError> {
        let path = self
            .core
            .path("taxonomies")
            .join(ALL_TAXONOMIES)
            .join("terms");
        let params = ParamStore::new().with("typeahead", typeahead);
        self.core.get_with(path, &params)
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;

    use crate::ManagementError;
    use crate::stack::Resource;
    use crate::stack::tests::stack;

    #[test]
    fn test_taxonomy_export() {
        let call = stack()
            .taxonomy("regions")
            .add_param("format", "json")
            .export()
            .expect("should build call");

        assert_eq!(call.request().path(), "/v3/taxonomies/regions/export");
        assert_eq!(call.request().query(), Some("format=json"));
    }

    #[test]
    fn test_terms_find() {
        let call = stack()
            .taxonomy("regions")
            .terms()
            .add_param("depth", 2)
            .find()
            .expect("should build call");

        let request = call.request();
        assert_eq!(request.segments(), ["v3", "taxonomies", "regions", "terms"]);
        assert_eq!(request.query(), Some("depth=2"));
    }

    #[test]
    fn test_terms_require_taxonomy() {
        let error = stack()
            .taxonomies()
            .term("europe")
            .ancestors()
            .expect_err("taxonomy is required");

        insta::assert_snapshot!(error, @"taxonomy UID must be set before calling ancestors");
    }

    #[test]
    fn test_term_tree() {
        let term = stack().taxonomy("regions").term("europe");

        let descendants = term.descendants().expect("should build call");
        let ancestors = term.ancestors().expect("should build call");

        assert_eq!(
            descendants.request().path(),
            "/v3/taxonomies/regions/terms/europe/descendants"
        );
        assert_eq!(
            ancestors.request().path(),
            "/v3/taxonomies/regions/terms/europe/ancestors"
        );
    }

    #[test]
    fn test_move_term() {
        let body = json!({"term": {"parent_uid": "world", "order": 2}});

        let call = stack()
            .taxonomy("regions")
            .term("europe")
            .add_param("force", true)
            .move_term(&body)
            .expect("should build call");

        let request = call.request();
        assert_eq!(request.method(), Method::PUT);
        assert_eq!(request.path(), "/v3/taxonomies/regions/terms/europe/move");
        assert_eq!(request.query(), Some("force=true"));
    }

    #[test]
    fn test_search() {
        let call = stack()
            .taxonomies()
            .terms()
            .search("eur")
            .expect("should build call");

        insta::assert_snapshot!(
            call.request().url(),
            @"https://api.contentstack.io/v3/taxonomies/$all/terms?typeahead=eur"
        );
    }

    #[test]
    fn test_blank_term() {
        let result = stack().taxonomy("regions").term(" ").fetch();

        assert!(matches!(
            result,
            Err(ManagementError::EmptyUid { resource: "term" })
        ));
    }
}
