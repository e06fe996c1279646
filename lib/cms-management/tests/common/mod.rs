#![allow(dead_code, missing_docs, clippy::expect_used)]

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http::uri::Scheme;
use rstest::fixture;
use serde_json::{Map, Value, json};
use tokio::task::JoinHandle;
use tracing::info;

use cms_management::{ManagementClient, Stack};

pub fn init_tracing() {
    // should be run once, fail otherwise, we skip that error
    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    info!("Tracing initialized");
}

/// A local server answering every request with a description of what it received.
///
/// `GET /v3/content_types/missing` answers with an API error document instead.
#[derive(Debug)]
pub struct EchoServer {
    port: u16,
    handle: JoinHandle<()>,
}

impl EchoServer {
    pub async fn start() -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let port = listener.local_addr()?.port();
        info!(%port, "launching echo server");

        let app = Router::new()
            .route("/v3/content_types/missing", get(missing_content_type))
            .fallback(echo);
        let handle = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, app).await {
                tracing::error!(?error, "echo server stopped");
            }
        });

        Ok(Self { port, handle })
    }

    pub fn client(&self) -> ManagementClient {
        ManagementClient::builder()
            .with_scheme(Scheme::HTTP)
            .with_host("127.0.0.1")
            .with_port(self.port)
            .with_authtoken("blt-session")
            .build()
            .expect("should build client")
    }

    pub fn stack(&self) -> Stack {
        self.client().stack("blt-api-key")
    }
}

impl Drop for EchoServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[fixture]
pub async fn server() -> EchoServer {
    init_tracing();
    match EchoServer::start().await {
        Ok(server) => server,
        Err(error) => {
            panic!("fail to start echo server: {error:?}");
        }
    }
}

async fn missing_content_type() -> Response {
    let body = json!({
        "error_message": "The Content Type 'missing' was not found. Please try again.",
        "error_code": 118,
        "errors": {"uid": ["is not valid."]}
    });
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

async fn echo(request: Request) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(str::to_string);
    let headers = request
        .headers()
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.as_str().to_string(), Value::String(value))
        })
        .collect::<Map<_, _>>();
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|it| it.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let body = if content_type.starts_with("multipart/form-data") {
        match read_multipart(request).await {
            Ok(parts) => parts,
            Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
        }
    } else {
        match axum::body::to_bytes(request.into_body(), usize::MAX).await {
            Ok(bytes) if bytes.is_empty() => Value::Null,
            Ok(bytes) => serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())),
            Err(error) => return (StatusCode::BAD_REQUEST, error.to_string()).into_response(),
        }
    };

    Json(json!({
        "method": method,
        "path": path,
        "query": query,
        "headers": headers,
        "body": body,
    }))
    .into_response()
}

async fn read_multipart(request: Request) -> Result<Value, String> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|error| error.body_text())?;

    let mut parts = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| error.body_text())?
    {
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|error| error.body_text())?;
        parts.push(json!({
            "name": name,
            "file_name": file_name,
            "content_type": content_type,
            "size": bytes.len(),
            "text": file_name.is_none().then(|| String::from_utf8_lossy(&bytes).into_owned()),
        }));
    }
    Ok(Value::Array(parts))
}
