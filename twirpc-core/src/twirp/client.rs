//! # Generic Twirp Client
//!
//! This module provides [`TwirpClient`], the unary request/response client every Twirp
//! stub is built on. It is agnostic to the Protobuf messages being exchanged; the
//! [`Codec`] passed to each call decides how they are serialized.
//!
//! ## How it works
//!
//! 1. The payload is encoded by the codec.
//! 2. The request is sent as `POST <base_url><prefix>/<package.Service>/<Method>` with
//!    `Content-Type: application/protobuf`.
//! 3. A 2xx body is decoded by the codec; any other status becomes a [`TwirpError`].
//!
//! Exactly one request is issued per call. There are no retries and no timeouts beyond
//! what the [`Transport`] enforces.
use super::codec::{Codec, CodecError};
use super::error::TwirpError;
use crate::BoxError;
use crate::transport::{HttpTransport, Transport};
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue, InvalidHeaderName, InvalidHeaderValue};
use std::str::FromStr;

/// Media type of binary Protobuf request and response bodies.
pub const CONTENT_TYPE_PROTOBUF: &str = "application/protobuf";

/// Path prefix used by Twirp servers unless configured otherwise.
pub const DEFAULT_PREFIX: &str = "/twirp";

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Invalid request for '{url}': '{source}'")]
    InvalidRequest { url: String, source: http::Error },
    #[error("Invalid header key '{key}': '{source}'")]
    InvalidHeaderName {
        key: String,
        source: InvalidHeaderName,
    },
    #[error("Invalid header value for key '{key}': '{source}'")]
    InvalidHeaderValue {
        key: String,
        source: InvalidHeaderValue,
    },
    #[error("Failed to encode request: '{0}'")]
    Encode(#[source] CodecError),
    #[error("Failed to decode response: '{0}'")]
    Decode(#[source] CodecError),
    #[error("Transport error: '{0}'")]
    Transport(#[source] BoxError),
}

/// A generic client for Twirp services.
///
/// The base address and prefix are fixed at construction. Calls share nothing but the
/// transport, so a single client can be used concurrently from many tasks.
#[derive(Debug, Clone)]
pub struct TwirpClient<T = HttpTransport> {
    base_url: String,
    prefix: String,
    transport: T,
}

impl TwirpClient<HttpTransport> {
    /// Creates a client for the server at `base_url`, in the full `scheme://host[:port]` form.
    ///
    /// The address is not validated here; a malformed one fails on the first call.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, HttpTransport::new())
    }
}

impl<T> TwirpClient<T> {
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            transport,
        }
    }

    /// Overrides the `/twirp` path prefix. An empty prefix routes to `/<service>/<method>`.
    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = normalize_prefix(prefix);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl<T> TwirpClient<T>
where
    T: Transport,
{
    /// Performs a unary Twirp call.
    ///
    /// # Returns
    /// * `Ok(Ok(response))` - The server answered 2xx and the body decoded.
    /// * `Ok(Err(TwirpError))` - The call executed, but the server returned an error.
    /// * `Err(ClientError)` - The request could not be built, sent or decoded.
    pub async fn unary<C: Codec>(
        &self,
        service: &str,
        method: &str,
        payload: C::Encode,
        codec: C,
        headers: Vec<(String, String)>,
    ) -> Result<Result<C::Decode, TwirpError>, ClientError> {
        let body = codec.encode(payload).map_err(ClientError::Encode)?;
        let url = format!(
            "{}{}",
            self.base_url,
            http_path(&self.prefix, service, method)
        );
        let request = build_request(&url, body, headers)?;

        tracing::debug!(%url, "sending twirp request");

        let response = self
            .transport
            .send(request)
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "received twirp response");

        if !status.is_success() {
            return Ok(Err(TwirpError::from_response(status, response.body())));
        }

        let value = codec
            .decode(response.into_body())
            .map_err(ClientError::Decode)?;
        Ok(Ok(value))
    }
}

/// Builds the request path, e.g. `/twirp/package.Service/Method`.
pub fn http_path(prefix: &str, service: &str, method: &str) -> String {
    format!("{prefix}/{service}/{method}")
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn build_request(
    url: &str,
    body: bytes::Bytes,
    headers: Vec<(String, String)>,
) -> Result<http::Request<bytes::Bytes>, ClientError> {
    let mut request = http::Request::post(url)
        .header(CONTENT_TYPE, CONTENT_TYPE_PROTOBUF)
        .body(body)
        .map_err(|source| ClientError::InvalidRequest {
            url: url.to_string(),
            source,
        })?;

    for (k, v) in headers {
        let key = HeaderName::from_str(&k).map_err(|source| ClientError::InvalidHeaderName {
            key: k.clone(),
            source,
        })?;
        let val = HeaderValue::from_str(&v)
            .map_err(|source| ClientError::InvalidHeaderValue { key: k, source })?;

        // The body is always protobuf, so the content type is not the caller's to change.
        if key == CONTENT_TYPE {
            tracing::warn!(value = %v, "ignoring caller supplied content-type header");
            continue;
        }
        request.headers_mut().append(key, val);
    }
    Ok(request)
}
