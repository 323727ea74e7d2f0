//! # Client State: Online
//!
//! This module defines the `DynamicClient` behavior when it is attached to a Twirp server
//! and resolves messages from its local `DescriptorPool`.
use super::{DynamicClient, DynamicRequest, DynamicResponse, Online};
use crate::transport::{HttpTransport, Transport};
use crate::twirp::client::{ClientError, TwirpClient};
use crate::twirp::codec::JsonCodec;
use prost_reflect::{DescriptorError, DescriptorPool};

/// Errors that can occur during a dynamic call in Online mode.
#[derive(Debug, thiserror::Error)]
pub enum DynamicCallError {
    #[error("Service '{0}' not found")]
    ServiceNotFound(String),
    #[error("Method '{0}' not found")]
    MethodNotFound(String),
    #[error("Method '{0}' is streaming, Twirp only supports unary methods")]
    StreamingNotSupported(String),
    #[error("Twirp client request error: '{0}'")]
    ClientError(#[from] ClientError),
}

impl DynamicClient<Online<HttpTransport>> {
    /// Creates an `Online` client for the server at `addr` using the default HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `addr` - The server address (e.g., `http://localhost:8080`).
    /// * `file_descriptor` - A vector of bytes containing the encoded `FileDescriptorSet`.
    pub fn online(addr: &str, file_descriptor: Vec<u8>) -> Result<Self, DescriptorError> {
        let pool = DescriptorPool::decode(file_descriptor.as_slice())?;
        Ok(Self::from_client(TwirpClient::new(addr), pool))
    }
}

impl<T> DynamicClient<Online<T>> {
    /// Creates an `Online` client from a preconfigured [`TwirpClient`] and schema.
    pub fn from_client(twirp_client: TwirpClient<T>, pool: DescriptorPool) -> Self {
        Self {
            state: Online { twirp_client, pool },
        }
    }

    pub fn twirp_client(&self) -> &TwirpClient<T> {
        &self.state.twirp_client
    }
}

impl<T> DynamicClient<Online<T>>
where
    T: Transport,
{
    /// Executes a dynamic Twirp request using the local descriptor pool.
    ///
    /// # Returns
    ///
    /// * `Ok(Ok(Value))` - Successful RPC execution.
    /// * `Ok(Err(TwirpError))` - RPC executed, but server returned an error.
    /// * `Err(DynamicCallError)` - The method could not be resolved or the request failed.
    pub async fn dynamic(
        &self,
        request: DynamicRequest,
    ) -> Result<DynamicResponse, DynamicCallError> {
        let method = self
            .state
            .pool
            .get_service_by_name(&request.service)
            .ok_or_else(|| DynamicCallError::ServiceNotFound(request.service.clone()))?
            .methods()
            .find(|m| m.name() == request.method)
            .ok_or_else(|| DynamicCallError::MethodNotFound(request.method.clone()))?;

        if method.is_client_streaming() || method.is_server_streaming() {
            return Err(DynamicCallError::StreamingNotSupported(
                method.full_name().to_string(),
            ));
        }

        let codec = JsonCodec::new(method.input(), method.output());
        let result = self
            .state
            .twirp_client
            .unary(
                &request.service,
                &request.method,
                request.body,
                codec,
                request.headers,
            )
            .await?;

        Ok(result)
    }
}
