//! Typed client for `twirp.clientcompat.CompatService`.
//!
//! Each RPC method gets its own entry point with concrete request and response types. The
//! codec for a method is chosen at compile time; there is no runtime type lookup.
use crate::pb::{Empty, Req, Resp};
use twirpc_core::transport::{HttpTransport, Transport};
use twirpc_core::twirp::client::{ClientError, TwirpClient};
use twirpc_core::twirp::codec::ProstCodec;
use twirpc_core::twirp::error::TwirpError;

/// Fully qualified name of the service, as it appears in request paths.
pub const SERVICE_NAME: &str = "twirp.clientcompat.CompatService";

#[derive(Debug, Clone)]
pub struct CompatServiceClient<T = HttpTransport> {
    client: TwirpClient<T>,
}

impl CompatServiceClient<HttpTransport> {
    /// Creates a new client for the CompatService service.
    ///
    /// `server_address` is the address of the server in the full `protocol://host:port` form.
    pub fn new(server_address: impl Into<String>) -> Self {
        Self::from_client(TwirpClient::new(server_address))
    }
}

impl<T> CompatServiceClient<T> {
    pub fn from_client(client: TwirpClient<T>) -> Self {
        Self { client }
    }
}

impl<T> CompatServiceClient<T>
where
    T: Transport,
{
    pub async fn method(&self, req: Req) -> Result<Result<Resp, TwirpError>, ClientError> {
        let codec = ProstCodec::<Req, Resp>::new();
        self.client
            .unary(SERVICE_NAME, "Method", req, codec, Vec::new())
            .await
    }

    pub async fn noop_method(
        &self,
        empty: Empty,
    ) -> Result<Result<Empty, TwirpError>, ClientError> {
        let codec = ProstCodec::<Empty, Empty>::new();
        self.client
            .unary(SERVICE_NAME, "NoopMethod", empty, codec, Vec::new())
            .await
    }
}
