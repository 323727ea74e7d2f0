//! # Message Codecs
//!
//! A [`Codec`] turns a request value into the bytes of an HTTP body and a successful
//! response body back into a value. Two implementations are provided:
//!
//! 1. **[`ProstCodec`]**: Bound at compile time to a pair of `prost` message types.
//!    Generated stubs carry one per method, so no runtime type lookup is ever performed.
//!
//! 2. **[`JsonCodec`]**: Bound at runtime to a pair of `MessageDescriptor`s.
//!    - **Encoder (JSON -> Proto)**: validates a `serde_json::Value` against the input
//!      descriptor through `prost_reflect::DynamicMessage` and serializes it.
//!    - **Decoder (Proto -> JSON)**: decodes the body into a `DynamicMessage` using the
//!      output descriptor and converts it back into a `serde_json::Value`.
use bytes::Bytes;
use prost::Message;
use prost_reflect::{DynamicMessage, MessageDescriptor};
use std::fmt;
use std::marker::PhantomData;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON structure does not match Protobuf schema: '{0}'")]
    SchemaMismatch(#[source] serde_json::Error),
    #[error("Failed to decode Protobuf bytes: '{0}'")]
    Decode(#[from] prost::DecodeError),
    #[error("Failed to map response to JSON: '{0}'")]
    Json(#[source] serde_json::Error),
}

/// Paired serialize/deserialize functions for one RPC method.
pub trait Codec {
    /// The request type handed to the codec.
    type Encode;
    /// The response type produced by the codec.
    type Decode;

    fn encode(&self, item: Self::Encode) -> Result<Bytes, CodecError>;

    fn decode(&self, body: Bytes) -> Result<Self::Decode, CodecError>;
}

/// A statically typed codec for `prost` generated messages.
pub struct ProstCodec<Req, Resp> {
    _marker: PhantomData<fn(Req) -> Resp>,
}

impl<Req, Resp> ProstCodec<Req, Resp> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<Req, Resp> Default for ProstCodec<Req, Resp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req, Resp> Clone for ProstCodec<Req, Resp> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<Req, Resp> fmt::Debug for ProstCodec<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProstCodec").finish()
    }
}

impl<Req, Resp> Codec for ProstCodec<Req, Resp>
where
    Req: Message,
    Resp: Message + Default,
{
    type Encode = Req;
    type Decode = Resp;

    fn encode(&self, item: Self::Encode) -> Result<Bytes, CodecError> {
        Ok(Bytes::from(item.encode_to_vec()))
    }

    fn decode(&self, body: Bytes) -> Result<Self::Decode, CodecError> {
        Ok(Resp::decode(body)?)
    }
}

/// A custom Codec that bridges `serde_json::Value` and Protobuf binary format.
///
/// It holds the descriptors (schemas) for both the request and the response messages,
/// allowing it to perform dynamic serialization.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    /// Schema for the input message.
    req_desc: MessageDescriptor,
    /// Schema for the output message.
    res_desc: MessageDescriptor,
}

impl JsonCodec {
    /// Creates a new `JsonCodec`.
    ///
    /// # Arguments
    /// * `req_desc` - Descriptor for the request message type.
    /// * `res_desc` - Descriptor for the response message type.
    pub fn new(req_desc: MessageDescriptor, res_desc: MessageDescriptor) -> Self {
        Self { req_desc, res_desc }
    }
}

impl Codec for JsonCodec {
    type Encode = serde_json::Value;
    type Decode = serde_json::Value;

    fn encode(&self, item: Self::Encode) -> Result<Bytes, CodecError> {
        // serde_json::Value is itself a Deserializer, so it can be handed over directly.
        let msg = DynamicMessage::deserialize(self.req_desc.clone(), item)
            .map_err(CodecError::SchemaMismatch)?;

        Ok(Bytes::from(msg.encode_to_vec()))
    }

    fn decode(&self, body: Bytes) -> Result<Self::Decode, CodecError> {
        let msg = DynamicMessage::decode(self.res_desc.clone(), body)?;

        serde_json::to_value(&msg).map_err(CodecError::Json)
    }
}
