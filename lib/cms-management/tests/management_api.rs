#![allow(missing_docs)]

use rstest::rstest;
use serde_json::{Value, json};
use tracing::info;

use cms_management::{ManagementError, MultipartForm, Resource};

mod common;
pub use self::common::*;

#[rstest]
#[tokio::test]
async fn test_find_sends_params_and_headers(#[future] server: EchoServer) -> anyhow::Result<()> {
    let server = server.await;

    let echo: Value = server
        .stack()
        .content_types()
        .add_param("include_count", true)
        .add_param("include_global_field_schema", true)
        .find()?
        .await?
        .json()?;
    info!(%echo, "received");

    assert_eq!(echo["method"], "GET");
    assert_eq!(echo["path"], "/v3/content_types");
    assert_eq!(
        echo["query"],
        "include_count=true&include_global_field_schema=true"
    );
    assert_eq!(echo["headers"]["api_key"], "blt-api-key");
    assert_eq!(echo["headers"]["authtoken"], "blt-session");
    assert!(
        echo["headers"]["user-agent"]
            .as_str()
            .is_some_and(|it| it.starts_with("cms-management-rust/"))
    );
    assert_eq!(echo["body"], Value::Null);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_create_sends_json_body(#[future] server: EchoServer) -> anyhow::Result<()> {
    let server = server.await;
    let body = json!({"entry": {"title": "Hello", "url": "/hello"}});

    let echo: Value = server
        .stack()
        .content_type("blog_post")
        .entries()
        .add_param("locale", "fr-fr")
        .create(&body)?
        .await?
        .json()?;

    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/v3/content_types/blog_post/entries");
    assert_eq!(echo["query"], "locale=fr-fr");
    assert_eq!(echo["headers"]["content-type"], "application/json");
    assert_eq!(echo["body"], body);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_upload_sends_multipart_form(#[future] server: EchoServer) -> anyhow::Result<()> {
    let server = server.await;
    let form = MultipartForm::new()
        .text("asset[title]", "Logo")
        .text("asset[parent_uid]", "blt-folder")
        .file("asset[upload]", "logo.png", mime::IMAGE_PNG, vec![0x89_u8, 0x50, 0x4e, 0x47]);

    let echo: Value = server.stack().assets().upload(form)?.await?.json()?;

    assert_eq!(echo["method"], "POST");
    assert_eq!(echo["path"], "/v3/assets");
    assert_eq!(
        echo["body"],
        json!([
            {"name": "asset[title]", "file_name": null, "content_type": null, "size": 4, "text": "Logo"},
            {"name": "asset[parent_uid]", "file_name": null, "content_type": null, "size": 10, "text": "blt-folder"},
            {"name": "asset[upload]", "file_name": "logo.png", "content_type": "image/png", "size": 4, "text": null}
        ])
    );

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_delete_with_body(#[future] server: EchoServer) -> anyhow::Result<()> {
    let server = server.await;
    let body = json!({"items": [{"uid": "blt-entry", "version": 1, "locale": "en-us"}]});

    let echo: Value = server
        .stack()
        .release("blt-release")
        .items()
        .delete_items(&body)?
        .await?
        .json()?;

    assert_eq!(echo["method"], "DELETE");
    assert_eq!(echo["path"], "/v3/releases/blt-release/items");
    assert_eq!(echo["body"], body);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_branch_and_call_headers(#[future] server: EchoServer) -> anyhow::Result<()> {
    let server = server.await;
    let stack = server.stack().with_branch("development");

    let traced: Value = stack
        .labels()
        .add_header("x-trace", "1")
        .find()?
        .with_header("x-request", "42")
        .await?
        .json()?;
    let plain: Value = stack.labels().find()?.await?.json()?;

    assert_eq!(traced["headers"]["branch"], "development");
    assert_eq!(traced["headers"]["x-trace"], "1");
    assert_eq!(traced["headers"]["x-request"], "42");
    assert_eq!(plain["headers"]["branch"], "development");
    assert_eq!(plain["headers"]["x-trace"], Value::Null);
    assert_eq!(plain["headers"]["x-request"], Value::Null);

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_api_error_document(#[future] server: EchoServer) -> anyhow::Result<()> {
    let server = server.await;

    let response = server.stack().content_type("missing").fetch()?.await?;
    assert_eq!(response.status().as_u16(), 422);
    assert!(!response.is_success());

    let error = response
        .json::<Value>()
        .expect_err("error status should fail");

    let (status, message, code, errors) = match error {
        ManagementError::Api {
            status,
            message,
            code,
            errors,
        } => (status, message, code, errors),
        other => anyhow::bail!("expected an API error, got {other:?}"),
    };
    assert_eq!(status, 422);
    assert_eq!(
        message,
        "The Content Type 'missing' was not found. Please try again."
    );
    assert_eq!(code, Some(118));
    assert_eq!(errors, Some(json!({"uid": ["is not valid."]})));

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_precondition_fails_without_network(
    #[future] server: EchoServer,
) -> anyhow::Result<()> {
    let server = server.await;

    let error = server
        .stack()
        .content_types()
        .fetch()
        .expect_err("uid is required");

    assert!(error.is_precondition());
    insta::assert_snapshot!(error, @"content type UID must be set before calling fetch");

    Ok(())
}

#[rstest]
#[tokio::test]
async fn test_management_token_stack_omits_session_token(
    #[future] server: EchoServer,
) -> anyhow::Result<()> {
    let server = server.await;

    let echo: Value = server
        .client()
        .stack_with_management_token("blt-api-key", "cs-management")
        .labels()
        .find()?
        .await?
        .json()?;

    assert_eq!(echo["headers"]["api_key"], "blt-api-key");
    assert_eq!(echo["headers"]["authorization"], "cs-management");
    assert_eq!(echo["headers"]["authtoken"], Value::Null);

    Ok(())
}
