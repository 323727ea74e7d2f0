//! # Dynamic Client
//!
//! This module implements schema-driven Twirp calls, where services, methods and messages
//! are resolved at runtime from a `FileDescriptorSet` instead of generated code.
//!
//! The [`DynamicClient`] uses a **Typestate Pattern** to separate what needs a server from
//! what does not. It has two possible states:
//!
//! 1. **[`Offline`]**: The client holds a local `FileDescriptorSet` and can only be used
//!    for introspection (listing services, describing symbols).
//! 2. **[`Online`]**: The client additionally holds a [`TwirpClient`] and can perform calls,
//!    sending and receiving JSON bodies transcoded to and from Protobuf.
//!
//! ## Example: State Transition
//!
//! ```rust,no_run
//! use twirpc_core::{DynamicClient, TwirpClient};
//!
//! # fn run() -> Result<(), Box<dyn std::error::Error>> {
//! // 1. Offline State (Local Schema only)
//! let bytes = std::fs::read("descriptor.bin")?;
//! let client = DynamicClient::offline(bytes)?;
//!
//! // 2. Transition to Online (Local Schema + Server)
//! let client = client.connect(TwirpClient::new("http://localhost:8080"));
//! # Ok(())
//! # }
//! ```
pub mod offline;
pub mod online;
mod types;

pub use types::*;

use crate::transport::HttpTransport;
use crate::twirp::client::TwirpClient;
use prost_reflect::DescriptorPool;

/// The main client for interacting with Twirp servers dynamically.
///
/// The generic parameter `T` represents the current state of the client.
#[derive(Clone, Debug)]
pub struct DynamicClient<T> {
    state: T,
}

/// State: Connected to a server, Schema from a local FileDescriptorSet.
#[derive(Debug, Clone)]
pub struct Online<T = HttpTransport> {
    twirp_client: TwirpClient<T>,
    pool: DescriptorPool,
}

/// State: Disconnected, Schema from a local FileDescriptorSet.
#[derive(Debug, Clone)]
pub struct Offline {
    pool: DescriptorPool,
}

/// Gives access to the schema, whatever the state of the client.
pub trait DescriptorState {
    fn descriptor_pool(&self) -> &DescriptorPool;
}

impl DescriptorState for Offline {
    fn descriptor_pool(&self) -> &DescriptorPool {
        &self.pool
    }
}

impl<T> DescriptorState for Online<T> {
    fn descriptor_pool(&self) -> &DescriptorPool {
        &self.pool
    }
}

impl<S> DynamicClient<S>
where
    S: DescriptorState,
{
    /// Lists all services defined in the local `DescriptorPool`.
    ///
    /// # Returns
    ///
    /// A list of fully qualified service names (e.g. `twirp.clientcompat.CompatService`).
    pub fn list_services(&self) -> Vec<String> {
        self.state
            .descriptor_pool()
            .services()
            .map(|s| s.full_name().to_string())
            .collect()
    }

    /// Looks up a specific symbol in the local `DescriptorPool`.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The fully qualified name (Service, Message, or Enum).
    ///
    /// # Returns
    ///
    /// * `Some(Descriptor)` - The resolved descriptor if found.
    /// * `None` - If the symbol does not exist in the pool.
    pub fn get_descriptor_by_symbol(&self, symbol: &str) -> Option<Descriptor> {
        let pool = self.state.descriptor_pool();

        if let Some(descriptor) = pool.get_service_by_name(symbol) {
            return Some(Descriptor::ServiceDescriptor(descriptor));
        }
        if let Some(descriptor) = pool.get_message_by_name(symbol) {
            return Some(Descriptor::MessageDescriptor(descriptor));
        }
        if let Some(descriptor) = pool.get_enum_by_name(symbol) {
            return Some(Descriptor::EnumDescriptor(descriptor));
        }
        None
    }
}
