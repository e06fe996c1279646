use std::future::{Future, IntoFuture};
use std::pin::Pin;

use headers::{ContentType, HeaderMapExt};
use reqwest::{Body, Request};
use tracing::debug;

use super::ApiCall;
use crate::client::{
    AUTHORIZATION_HEADER, AUTHTOKEN_HEADER, ApiResponse, ManagementError, RequestBody,
};

impl ApiCall {
    /// Builds the `reqwest` request for this call without sending it.
    ///
    /// # Errors
    ///
    /// Fails on invalid header names or values, or a body that cannot be encoded.
    ///
    /// The credentials header is added here, unless the call headers already
    /// carry `authtoken` or `authorization`.
    pub fn build_request(&self) -> Result<Request, ManagementError> {
        let request = &self.request;
        let mut headers = request.headers().to_header_map()?;
        if let Some(credentials) = request.credentials()
            && !headers.contains_key(AUTHTOKEN_HEADER)
            && !headers.contains_key(AUTHORIZATION_HEADER)
        {
            let (name, value) = credentials.to_header()?;
            headers.insert(name, value);
        }

        let builder = self
            .client
            .request(request.method().clone(), request.url());

        let builder = match request.body() {
            None => builder,
            Some(RequestBody::Json(value)) => {
                headers.typed_insert(ContentType::json());
                builder.body(Body::from(serde_json::to_vec(value)?))
            }
            Some(RequestBody::Multipart(form)) => builder.multipart(form.to_reqwest()?),
        };

        let result = builder.headers(headers).build()?;
        Ok(result)
    }

    /// Sends the request and reads the whole response.
    ///
    /// The response is returned whatever its status; see [`ApiResponse::json`] and
    /// [`ApiResponse::into_result`] to turn error statuses into errors.
    ///
    /// # Errors
    ///
    /// Fails if the request cannot be built or the transport fails.
    pub async fn send(self) -> Result<ApiResponse, ManagementError> {
        let request = self.build_request()?;
        let path = self.request.path();

        debug!(method = %request.method(), url = %request.url(), "sending...");
        let response = self.client.execute(request).await?;
        let status = response.status();
        debug!(%status, %path, "...receiving");

        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(ApiResponse::new(path, status, headers, body))
    }
}

/// Implement `IntoFuture` for `ApiCall` to enable direct `.await` syntax.
impl IntoFuture for ApiCall {
    type Output = Result<ApiResponse, ManagementError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.send())
    }
}
