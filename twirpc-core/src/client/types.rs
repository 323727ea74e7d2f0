use crate::twirp::error::TwirpError;
use prost_reflect::{EnumDescriptor, MessageDescriptor, ServiceDescriptor};

/// A request object encapsulating all necessary information to perform a dynamic Twirp call.
#[derive(Debug, Clone)]
pub struct DynamicRequest {
    /// The JSON body of the request, an Object `{}` matching the method's input message.
    pub body: serde_json::Value,
    /// Custom HTTP headers to attach to the request.
    pub headers: Vec<(String, String)>,
    /// The fully qualified name of the service (e.g., `my.package.Service`).
    pub service: String,
    /// The name of the method to call (e.g., `SayHello`).
    pub method: String,
}

/// The result of a dynamic Twirp call that reached the server: either the decoded
/// JSON response or the error the server answered with.
pub type DynamicResponse = Result<serde_json::Value, TwirpError>;

/// A generic wrapper for different types of Protobuf descriptors.
///
/// This enum allows the client to return a single type when resolving symbols,
/// regardless of whether the symbol points to a Service, a Message, or an Enum.
#[derive(Debug, Clone)]
pub enum Descriptor {
    MessageDescriptor(MessageDescriptor),
    ServiceDescriptor(ServiceDescriptor),
    EnumDescriptor(EnumDescriptor),
}

impl Descriptor {
    /// The fully qualified name of the symbol (e.g. `twirp.clientcompat.Req`).
    pub fn full_name(&self) -> &str {
        match self {
            Descriptor::MessageDescriptor(v) => v.full_name(),
            Descriptor::ServiceDescriptor(v) => v.full_name(),
            Descriptor::EnumDescriptor(v) => v.full_name(),
        }
    }

    /// The last segment of [`Descriptor::full_name`] (e.g. `Req`).
    pub fn name(&self) -> &str {
        let full_name = self.full_name();
        full_name.rsplit('.').next().unwrap_or(full_name)
    }

    /// The package the symbol was declared in (e.g. `twirp.clientcompat`).
    pub fn package_name(&self) -> &str {
        match self {
            Descriptor::MessageDescriptor(v) => v.package_name(),
            Descriptor::ServiceDescriptor(v) => v.package_name(),
            Descriptor::EnumDescriptor(v) => v.package_name(),
        }
    }

    pub fn message_descriptor(&self) -> Option<&MessageDescriptor> {
        match self {
            Descriptor::MessageDescriptor(d) => Some(d),
            _ => None,
        }
    }

    pub fn service_descriptor(&self) -> Option<&ServiceDescriptor> {
        match self {
            Descriptor::ServiceDescriptor(d) => Some(d),
            _ => None,
        }
    }
}
