//! # Client State: Offline
//!
//! This module defines the `DynamicClient` behavior when it is using a local, in-memory
//! `DescriptorPool` but has no server to talk to.
//!
//! In this state, the client is strictly limited to introspection tasks.
use super::{DynamicClient, Offline, Online};
use crate::twirp::client::TwirpClient;
use prost_reflect::{DescriptorError, DescriptorPool};

impl DynamicClient<Offline> {
    /// Creates a new `DynamicClient` in the Offline state using a raw byte buffer
    /// containing a `FileDescriptorSet`.
    ///
    /// # Arguments
    ///
    /// * `file_descriptor` - A vector of bytes containing the encoded `FileDescriptorSet`.
    ///
    /// # Returns
    ///
    /// * `Ok(DynamicClient<Offline>)` - The initialized offline client.
    /// * `Err(DescriptorError)` - If the bytes are not a valid descriptor set.
    pub fn offline(file_descriptor: Vec<u8>) -> Result<Self, DescriptorError> {
        let pool = DescriptorPool::decode(file_descriptor.as_slice())?;
        Ok(Self::from_pool(pool))
    }

    /// Creates a new `DynamicClient` in the Offline state from an already built pool.
    pub fn from_pool(pool: DescriptorPool) -> Self {
        Self {
            state: Offline { pool },
        }
    }

    /// Attaches a server to the client, transitioning it to the `Online` state.
    pub fn connect<T>(self, twirp_client: TwirpClient<T>) -> DynamicClient<Online<T>> {
        DynamicClient {
            state: Online {
                twirp_client,
                pool: self.state.pool,
            },
        }
    }
}
