//! Request parameter types for building management API calls.
//!
//! - [`ApiPath`] - Ordered path segments (e.g., `/v3/content_types/blog`)
//! - [`ParamStore`] - Query string parameters
//! - [`HeaderStore`] - HTTP headers
//! - [`RequestBody`] - JSON or multipart request body

mod value;
pub use self::value::ParamValue;

mod path;
pub use self::path::ApiPath;

mod query;
pub use self::query::ParamStore;

mod headers;
pub use self::headers::HeaderStore;

mod body;
pub use self::body::{FormPart, MultipartForm, RequestBody};
