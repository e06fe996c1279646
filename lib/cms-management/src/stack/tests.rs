use http::Method;
use serde_json::json;

use super::*;

/// Stack with an API key, on a client authenticated with a session token.
pub(crate) fn stack() -> Stack {
    ManagementClient::builder()
        .with_authtoken("blt-session")
        .build()
        .expect("should build client")
        .stack("blt-api-key")
}

#[test]
fn test_fetch() {
    let call = stack().fetch().expect("should build call");

    let request = call.request();
    assert_eq!(request.method(), Method::GET);
    assert_eq!(request.path(), "/v3/stacks");
    assert!(request.query().is_none());
    assert_eq!(request.headers().get("api_key"), Some("blt-api-key"));
    assert_eq!(
        request.credentials(),
        Some(&Credentials::AuthToken("blt-session".into()))
    );
}

#[test]
fn test_create_sends_organization_header() {
    let body = json!({"stack": {"name": "My stack", "master_locale": "en-us"}});

    let call = ManagementClient::builder()
        .with_authtoken("blt-session")
        .build()
        .expect("should build client")
        .stack_without_key()
        .create("blt-org", &body)
        .expect("should build call");

    let request = call.request();
    assert_eq!(request.method(), Method::POST);
    assert_eq!(request.headers().get("organization_uid"), Some("blt-org"));
    assert!(!request.headers().contains("api_key"));
}

#[test]
fn test_create_requires_body() {
    let result = stack().create("blt-org", &serde_json::Value::Null);

    assert!(matches!(
        result,
        Err(ManagementError::MissingBody {
            resource: "stack",
            operation: "create"
        })
    ));
}

#[test]
fn test_accept_ownership() {
    let call = stack()
        .accept_ownership("ownership-token", "blt-user")
        .expect("should build call");

    let request = call.request();
    assert_eq!(request.path(), "/v3/stacks/accept_ownership/ownership-token");
    assert_eq!(request.query(), Some("api_key=blt-api-key&uid=blt-user"));
}

#[test]
fn test_settings() {
    let stack = stack();

    let fetch = stack.settings().expect("should build call");
    let reset = stack.reset_settings().expect("should build call");

    assert_eq!(fetch.request().method(), Method::GET);
    assert_eq!(fetch.request().path(), "/v3/stacks/settings");
    assert_eq!(reset.request().method(), Method::POST);
    let body = reset
        .request()
        .body()
        .and_then(|it| it.as_json())
        .map(ToString::to_string)
        .unwrap_or_default();
    insta::assert_snapshot!(
        body,
        @r#"{"stack_settings":{"discrete_variables":{},"rte":{},"stack_variables":{}}}"#
    );
}

#[test]
fn test_share_and_unshare() {
    let stack = stack();

    let share = stack
        .share(&json!({"emails": ["someone@example.com"], "roles": {"someone@example.com": ["blt-role"]}}))
        .expect("should build call");
    let unshare = stack
        .unshare("someone@example.com")
        .expect("should build call");

    assert_eq!(share.request().path(), "/v3/stacks/share");
    assert_eq!(unshare.request().path(), "/v3/stacks/unshare");
    assert_eq!(
        unshare.request().body().and_then(|it| it.as_json()),
        Some(&json!({"email": "someone@example.com"}))
    );
}

#[test]
fn test_users() {
    let call = stack().users().expect("should build call");

    assert_eq!(call.request().path(), "/v3/stacks");
    assert_eq!(call.request().query(), Some("include_collaborators=true"));
}

#[test]
fn test_update_user_roles() {
    let call = stack()
        .update_user_roles(&json!({"users": {"blt-user": ["blt-role"]}}))
        .expect("should build call");

    assert_eq!(call.request().path(), "/v3/stacks/users/roles");
}

#[test]
fn test_transfer_ownership() {
    let call = stack()
        .transfer_ownership(&json!({"transfer_to": "someone@example.com"}))
        .expect("should build call");

    assert_eq!(call.request().method(), Method::POST);
    assert_eq!(call.request().path(), "/v3/stacks/transfer_ownership");
}

#[test]
fn test_sibling_header_isolation() {
    let stack = stack();
    let first = stack.content_types();
    let second = stack.content_types();

    let first = first.add_header("x-custom", "first").remove_header("api_key");

    assert_eq!(first.headers().len(), 1);
    assert_eq!(second.headers().len(), 1);
    assert_eq!(second.headers().get("api_key"), Some("blt-api-key"));
    assert!(!second.headers().contains("x-custom"));
    assert_eq!(stack.headers().len(), 1);
}

#[test]
fn test_handle_copies_stack_headers_at_creation() {
    let stack = stack();
    let before = stack.labels();

    let stack = stack.with_branch("development");
    let after = stack.labels();

    assert!(!before.headers().contains("branch"));
    assert_eq!(after.headers().get("branch"), Some("development"));
}

#[test]
fn test_call_is_a_snapshot() {
    let labels = stack().labels().add_param("include_count", true);
    let call = labels.find().expect("should build call");

    let labels = labels.add_param("skip", 10).add_header("x-later", "1");

    assert_eq!(call.request().query(), Some("include_count=true"));
    assert!(!call.request().headers().contains("x-later"));
    assert_eq!(labels.params().len(), 2);
}

#[test]
fn test_clear_then_add_params() {
    let labels = stack()
        .labels()
        .add_param("include_count", true)
        .clear_params()
        .add_param("a", 1)
        .add_param("b", 2)
        .add_param("c", 3);

    assert_eq!(labels.params().len(), 3);
}

#[test]
fn test_remove_absent_param_is_noop() {
    let labels = stack()
        .labels()
        .add_param("include_count", true)
        .remove_param("missing");

    assert_eq!(labels.params().len(), 1);
}

#[test]
fn test_query_rendering_is_idempotent() {
    let labels = stack()
        .labels()
        .add_param("include_count", true)
        .add_param("limit", 10);

    let first = labels.find().expect("should build call");
    let second = labels.find().expect("should build call");

    assert_eq!(first.request().query(), second.request().query());
    assert_eq!(first.request().url(), second.request().url());
}

#[test]
fn test_handle_header_overrides_client_header() {
    let call = stack()
        .labels()
        .add_header("authtoken", "blt-other-session")
        .find()
        .expect("should build call");

    let request = call.build_request().expect("should build request");

    assert_eq!(call.request().headers().get("authtoken"), Some("blt-other-session"));
    let values: Vec<_> = request.headers().get_all("authtoken").iter().collect();
    assert_eq!(values, vec!["blt-other-session"]);
}

#[test]
fn test_management_token_replaces_client_credentials() {
    let stack = stack();
    let client = ManagementClient::builder()
        .with_authtoken("blt-session")
        .build()
        .expect("should build client");
    let token_stack = client.stack_with_management_token("blt-api-key", "cs-management");

    let call = token_stack
        .content_type("blog")
        .entries()
        .find()
        .expect("should build call");
    let request = call.build_request().expect("should build request");

    let headers: Vec<_> = call
        .request()
        .headers()
        .iter()
        .filter(|(name, _)| *name != "user-agent")
        .collect();
    assert_eq!(headers, vec![("api_key", "blt-api-key")]);
    assert_eq!(
        call.request().credentials(),
        Some(&Credentials::ManagementToken("cs-management".into()))
    );
    assert!(request.headers().get("authtoken").is_none());
    assert_eq!(
        request.headers().get("authorization").map(|it| it.as_bytes()),
        Some(&b"cs-management"[..])
    );

    let session_call = stack.labels().find().expect("should build call");
    let session_request = session_call.build_request().expect("should build request");
    assert_eq!(
        session_request.headers().get("authtoken").map(|it| it.as_bytes()),
        Some(&b"blt-session"[..])
    );
    assert!(session_request.headers().get("authorization").is_none());
}

#[test]
fn test_handle_header_names_ignore_case() {
    let labels = stack()
        .labels()
        .add_header("X-Trace", "1")
        .add_header("x-trace", "2")
        .add_header("User-Agent", "my-app/2.0")
        .remove_header("API_KEY");

    let call = labels.find().expect("should build call");
    let request = call.build_request().expect("should build request");

    assert!(!labels.headers().contains("api_key"));
    assert_eq!(
        call.request().headers().iter().collect::<Vec<_>>(),
        vec![("user-agent", "my-app/2.0"), ("x-trace", "2")]
    );
    assert_eq!(request.headers().get_all("x-trace").iter().count(), 1);
    assert_eq!(request.headers().get_all("user-agent").iter().count(), 1);
}
