//! # CMS Management
//!
//! Client for the management REST API of a headless CMS.
//!
//! Every resource of a stack (content types, entries, assets, branches, releases,
//! taxonomies, workflows, tokens...) is reached through a *resource handle*. Handle
//! methods are named after the operation they perform and return an [`ApiCall`]: a
//! request that can be inspected before it is sent, then executed with `.await`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cms_management::{ManagementClient, Resource};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), cms_management::ManagementError> {
//! let client = ManagementClient::builder()
//!     .with_authtoken("blt-session-token")
//!     .build()?;
//!
//! let stack = client.stack("blt-api-key");
//!
//! let content_types: serde_json::Value = stack
//!     .content_types()
//!     .add_param("include_count", true)
//!     .add_param("include_global_field_schema", true)
//!     .find()?
//!     .await?  // ← Direct await using IntoFuture
//!     .json()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting Requests
//!
//! Building a call never touches the network, so requests can be checked as plain
//! values:
//!
//! ```rust
//! use cms_management::{ManagementClient, Resource};
//!
//! # fn example() -> Result<(), cms_management::ManagementError> {
//! let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
//! let call = client
//!     .stack("blt-api-key")
//!     .content_types()
//!     .add_param("include_count", true)
//!     .add_param("include_global_field_schema", true)
//!     .find()?;
//!
//! let request = call.request();
//! assert_eq!(request.method(), http::Method::GET);
//! assert_eq!(request.path(), "/v3/content_types");
//! assert_eq!(
//!     request.query(),
//!     Some("include_count=true&include_global_field_schema=true")
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Headers and Isolation
//!
//! Credentials are not stored as plain headers. They are written to the outgoing
//! request when it is sent, so they stay wiped-on-drop secrets until then. A stack
//! created with [`ManagementClient::stack_with_management_token`] uses its management
//! token instead of the client's session token.
//!
//! Client-level headers (user agent, early-access features) are sent with every
//! request. A stack adds its `api_key` and optionally a `branch`. Header names are
//! case-insensitive. Each handle takes a *copy* of the stack headers when it is created:
//!
//! ```rust
//! use cms_management::{ManagementClient, Resource};
//!
//! # fn example() -> Result<(), cms_management::ManagementError> {
//! let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
//! let stack = client.stack("blt-api-key");
//!
//! let entries = stack.content_type("blog").entries().add_header("x-trace", "1");
//! let assets = stack.assets();
//!
//! assert!(entries.headers().contains("x-trace"));
//! assert!(!assets.headers().contains("x-trace"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Validation
//!
//! Operations addressing a single item need a UID. A missing or blank UID fails before
//! any request is built:
//!
//! ```rust
//! use cms_management::{ManagementClient, ManagementError};
//!
//! # fn example() -> Result<(), ManagementError> {
//! let client = ManagementClient::builder().with_authtoken("blt-token").build()?;
//! let stack = client.stack("blt-api-key");
//!
//! let error = stack.roles().fetch().unwrap_err();
//! assert_eq!(error.to_string(), "role UID must be set before calling fetch");
//!
//! let error = stack.role("").fetch().unwrap_err();
//! assert_eq!(error.to_string(), "role UID can not be empty");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Responses are returned whatever their status. [`ApiResponse::json`] and
//! [`ApiResponse::into_result`] turn an error status into [`ManagementError::Api`],
//! carrying the `error_message`, `error_code` and `errors` of the API error document.

mod client;

pub mod stack;

pub use self::client::{
    API_KEY_HEADER, AUTHORIZATION_HEADER, AUTHTOKEN_HEADER, ApiCall, ApiPath, ApiResponse,
    Credentials, EARLY_ACCESS_HEADER, FormPart, HeaderStore, ManagementClient,
    ManagementClientBuilder, ManagementError, MultipartForm, ParamStore, ParamValue, Region,
    RequestBody, RequestDescriptor, SecureString,
};
pub use self::stack::{Resource, Stack};
