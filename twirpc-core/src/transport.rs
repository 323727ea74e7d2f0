//! # HTTP Transport
//!
//! The [`Transport`] trait is the seam between the Twirp client and the network. A transport
//! receives a fully built `http::Request` and hands back the complete `http::Response`,
//! buffered in memory. It never inspects status codes: a `404` or a `500` is still a
//! successful exchange from the transport's point of view.
//!
//! Connection handling, TLS, redirects and timeouts are the transport's concern. The default
//! [`HttpTransport`] delegates all of them to `reqwest`.
use crate::BoxError;
use bytes::Bytes;
use std::future::Future;
use std::sync::Arc;

/// Executes a single HTTP exchange.
pub trait Transport {
    fn send(
        &self,
        request: http::Request<Bytes>,
    ) -> impl Future<Output = Result<http::Response<Bytes>, BoxError>> + Send;
}

/// The default transport, backed by a `reqwest::Client`.
///
/// Cloning is cheap and clones share the underlying connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a preconfigured `reqwest::Client` (timeouts, TLS roots, proxies...).
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: http::Request<Bytes>) -> Result<http::Response<Bytes>, BoxError> {
        let request = reqwest::Request::try_from(request)?;
        let response = self.client.execute(request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        let mut out = http::Response::new(body);
        *out.status_mut() = status;
        *out.headers_mut() = headers;
        Ok(out)
    }
}

impl<T> Transport for Arc<T>
where
    T: Transport,
{
    fn send(
        &self,
        request: http::Request<Bytes>,
    ) -> impl Future<Output = Result<http::Response<Bytes>, BoxError>> + Send {
        (**self).send(request)
    }
}
