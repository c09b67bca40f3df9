use std::borrow::Cow;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::{Error, ResponseError};

pub mod account;
pub mod application;
pub mod misc;
pub mod post;

const APPLICATION_JSON: &str = "application/json";

/// One store operation: a method, a path and a body shape.
#[async_trait::async_trait]
pub trait Request {
    type Output;

    const METHOD: reqwest::Method = reqwest::Method::GET;

    /// Path below the base URL, starting with `/`.
    fn path(&self) -> Cow<'static, str>;

    /// Attaches query and body.
    fn make_req(&self, req: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, Error> {
        Ok(req)
    }

    async fn parse_res(&mut self, response: reqwest::Response) -> Result<Self::Output, Error>;
}

/// Calls a [`Request`] and return its output.
pub async fn call<T: Request + Send>(
    mut req: T,
    cx: &crate::Context,
) -> Result<<T as Request>::Output, Error> {
    let path = req.path();
    tracing::debug!(method = %T::METHOD, %path, "sending request");

    let response = req
        .make_req(
            cx.req_client
                .request(T::METHOD, format!("{}{}", cx.url_prefix, path))
                .header(CONTENT_TYPE, APPLICATION_JSON)
                .header(ACCEPT, APPLICATION_JSON),
        )?
        .send()
        .await
        .map_err(|err| {
            tracing::warn!(method = %T::METHOD, %path, "transport failure: {err}");
            Error::Transport(err)
        })?;
    let status = response.status();

    if !status.is_success() {
        #[derive(serde::Deserialize)]
        struct ThrownError {
            error: String,
        }

        let err_msg = response
            .json::<ThrownError>()
            .await
            .ok()
            .map(|msg| msg.error);

        tracing::warn!(method = %T::METHOD, %path, %status, "request failed");

        return Err(Error::Status(ResponseError {
            status_code: status,
            error: err_msg,
        }));
    }

    req.parse_res(response).await
}

/// Decodes a JSON response body.
pub(crate) async fn json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, Error> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(Error::Decode)
}
